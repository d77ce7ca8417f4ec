//! The editor context: everything operations and fixes read from or act on.

use std::sync::Arc;

use osmedit_actions::Action;
use osmedit_model::{Difference, Entity, EntityId, Geometry, Graph, TagVocabulary};
use tracing::debug;

use crate::connection::DataSource;
use crate::error::Result;
use crate::features::FeatureFilter;
use crate::history::History;
use crate::locale::{Catalog, Locale};
use crate::map::{MapView, Viewport};
use crate::mode::Mode;

#[derive(Debug)]
pub struct Context {
    history: History,
    mode: Mode,
    vocabulary: Arc<TagVocabulary>,
    locale: Arc<dyn Locale>,
    connection: Option<Arc<dyn DataSource>>,
    map: Box<dyn MapView>,
    features: FeatureFilter,
}

impl Context {
    /// A context editing `graph`, browsing, with no strings and no data source.
    pub fn new(graph: Graph, vocabulary: Arc<TagVocabulary>) -> Self {
        Self {
            history: History::new(graph),
            mode: Mode::default(),
            vocabulary,
            locale: Arc::new(Catalog::default()),
            connection: None,
            map: Box::new(Viewport::default()),
            features: FeatureFilter::default(),
        }
    }

    #[must_use]
    pub fn with_locale(mut self, locale: Arc<dyn Locale>) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn with_connection(mut self, connection: Arc<dyn DataSource>) -> Self {
        self.connection = Some(connection);
        self
    }

    #[must_use]
    pub fn with_map(mut self, map: Box<dyn MapView>) -> Self {
        self.map = map;
        self
    }

    #[must_use]
    pub fn with_features(mut self, features: FeatureFilter) -> Self {
        self.features = features;
        self
    }

    /// The current graph snapshot.
    pub fn graph(&self) -> &Graph {
        self.history.graph()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Apply `action` to the current graph and commit it.
    pub fn perform(
        &mut self,
        action: &dyn Action,
        annotation: impl Into<String>,
    ) -> Result<Difference> {
        self.history.perform(action, annotation)
    }

    pub fn enter(&mut self, mode: Mode) {
        debug!(from = self.mode.id(), to = mode.id(), "entering mode");
        self.mode = mode;
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn has_entity(&self, id: EntityId) -> Option<&Entity> {
        self.graph().has_entity(id)
    }

    pub fn entity(&self, id: EntityId) -> Result<&Entity> {
        Ok(self.graph().entity(id)?)
    }

    pub fn geometry(&self, id: EntityId) -> Result<Geometry> {
        Ok(self.graph().geometry(id, &self.vocabulary)?)
    }

    /// The remote data source, if the editor is connected to one.
    pub fn connection(&self) -> Option<&dyn DataSource> {
        self.connection.as_deref()
    }

    pub fn has_hidden_connections(&self, id: EntityId) -> bool {
        self.features
            .has_hidden_connections(id, self.graph(), &self.vocabulary)
    }

    pub fn features(&self) -> &FeatureFilter {
        &self.features
    }

    pub fn features_mut(&mut self) -> &mut FeatureFilter {
        &mut self.features
    }

    pub fn map(&self) -> &dyn MapView {
        self.map.as_ref()
    }

    pub fn map_mut(&mut self) -> &mut dyn MapView {
        self.map.as_mut()
    }

    pub fn vocabulary(&self) -> &Arc<TagVocabulary> {
        &self.vocabulary
    }

    pub fn locale(&self) -> &dyn Locale {
        self.locale.as_ref()
    }

    /// Localized string for `key`.
    pub fn t(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.locale.t(key, params)
    }

    /// Human-readable name for an entity: its `name`, its `ref`, or its
    /// localized geometry.
    pub fn display_label(&self, entity: &Entity) -> String {
        if let Some(label) = entity.tag("name").or_else(|| entity.tag("ref")) {
            return label.to_string();
        }
        let geometry = self.graph().entity_geometry(entity, &self.vocabulary);
        self.t(&format!("geometry.{geometry}"), &[])
    }
}

#[cfg(test)]
mod tests {
    use osmedit_actions::reverse::ReverseAction;
    use osmedit_model::{Loc, Node, Way, tags};

    use super::*;

    fn context() -> Context {
        let graph = Graph::from_entities([
            Node::new(EntityId::node(1), Loc::new(0.0, 0.0)).into(),
            Node::new(EntityId::node(2), Loc::new(0.001, 0.0)).into(),
            Way::new(EntityId::way(1), vec![EntityId::node(1), EntityId::node(2)])
                .with_tags(tags([("highway", "residential"), ("ref", "B 12")]))
                .into(),
        ]);
        Context::new(graph, Arc::new(TagVocabulary::default()))
    }

    #[test]
    fn perform_advances_the_graph() {
        let mut context = context();
        let base = context.graph().clone();
        let difference = context
            .perform(&ReverseAction::new(EntityId::way(1)), "Reversed a line.")
            .unwrap();

        assert_eq!(difference.extant_ids(), vec![EntityId::way(1)]);
        assert_eq!(context.history().len(), 1);
        let way = context.graph().way(EntityId::way(1)).unwrap();
        assert_eq!(way.first(), Some(EntityId::node(2)));
        assert_eq!(base.way(EntityId::way(1)).unwrap().first(), Some(EntityId::node(1)));
    }

    #[test]
    fn failed_actions_leave_history_untouched() {
        let mut context = context();
        let result = context.perform(&ReverseAction::new(EntityId::way(7)), "nope");
        assert!(result.is_err());
        assert!(context.history().is_empty());
    }

    #[test]
    fn labels_prefer_name_then_ref_then_geometry() {
        let mut context = context();
        let way = context.entity(EntityId::way(1)).unwrap().clone();
        assert_eq!(context.display_label(&way), "B 12");

        let node = context.entity(EntityId::node(1)).unwrap().clone();
        assert_eq!(context.display_label(&node), "geometry.vertex");

        context = context.with_locale(Arc::new(Catalog::english().unwrap()));
        assert_eq!(context.display_label(&node), "vertex");
    }

    #[test]
    fn entering_modes_replaces_the_current_one() {
        let mut context = context();
        assert_eq!(context.mode().id(), "browse");
        context.enter(Mode::select([EntityId::way(1)]));
        assert_eq!(context.mode().selected_ids(), &[EntityId::way(1)]);
    }
}
