//! 文档：内存中的图形目录
//!
//! 按插入顺序保存实体，"第一个选中的线段" 即插入顺序中最早的选中线段。

use crate::action::ActionResult;
use zmeasure_core::catalog::{Entity, EntityId, LayerKind, ShapeCatalog, ShapeView};
use zmeasure_core::config::MeasureConfig;
use zmeasure_core::geometry::Geometry;
use zmeasure_core::math::Vector2;
use zmeasure_core::relation::LineRelationSolver;
use zmeasure_core::snap::SnapResolver;

#[derive(Debug, Clone, Default)]
pub struct Document {
    entities: Vec<Entity>,
    config: MeasureConfig,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MeasureConfig) -> Self {
        Self {
            entities: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &MeasureConfig {
        &self.config
    }

    pub fn solver(&self) -> LineRelationSolver {
        LineRelationSolver::new(self.config.construction)
    }

    pub fn snap_resolver(&self) -> SnapResolver {
        SnapResolver::new(self.config.snap)
    }

    /// 添加用户绘制的图形
    pub fn add_geometry(&mut self, geometry: Geometry) -> EntityId {
        self.add_entity(Entity::new(geometry))
    }

    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.entities.push(entity);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// 设置选中状态，实体不存在时返回 `false`
    pub fn set_selected(&mut self, id: EntityId, selected: bool) -> bool {
        match self.entities.iter_mut().find(|e| e.id == id) {
            Some(entity) => {
                entity.selected = selected;
                true
            }
            None => false,
        }
    }

    /// 拖动实体的控制点
    ///
    /// 实体不存在或拖动无效（索引越界、圆的三点共线）时不修改，返回 `false`。
    pub fn move_handle(&mut self, id: EntityId, index: usize, delta: Vector2) -> bool {
        let Some(entity) = self.entities.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        match entity.geometry.move_handle(index, delta) {
            Some(geometry) => {
                entity.geometry = geometry;
                true
            }
            None => {
                tracing::debug!("Ignored drag of handle {} on {}", index, id);
                false
            }
        }
    }

    pub fn clear_selection(&mut self) {
        for entity in &mut self.entities {
            entity.selected = false;
        }
    }

    /// 应用 action 结果：新图形放在测量图层
    ///
    /// 返回新建实体的ID。
    pub fn apply(&mut self, result: &ActionResult) -> Vec<EntityId> {
        let ActionResult::CreateEntities(geometries) = result else {
            return Vec::new();
        };

        let ids: Vec<EntityId> = geometries
            .iter()
            .cloned()
            .map(|g| self.add_entity(Entity::new(g).with_layer(LayerKind::Measure)))
            .collect();

        tracing::info!("Created {} measure entities", ids.len());
        ids
    }
}

impl ShapeCatalog for Document {
    fn shapes(&self) -> impl Iterator<Item = ShapeView> + '_ {
        self.entities.as_slice().shapes()
    }
}
