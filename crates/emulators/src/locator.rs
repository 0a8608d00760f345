use crate::error::EmulatorResult;
use crate::roles::{Lookup, Role};
use crate::settings::EmulatorSettings;
use crate::toolbar::{Toolbar, ToolbarLayout, nth, nth_child};
use gallery_pilot_core::provider::{ProviderError, ProviderErrorKind};
use gallery_pilot_core::ui::{Cardinality, ElementQuery, UiElement, attribute_names};
use gallery_pilot_runtime::Session;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// Resolves logical roles into elements of the live UI tree.
///
/// A locator may be scoped to an element (see [`ElementLocator::within`]); queries then only
/// search that element's descendants. Element handles are never cached: every call queries
/// the tree again. Only the toolbar layout is probed once per locator.
pub struct ElementLocator<'a> {
    session: &'a Session,
    scope: Option<Arc<dyn UiElement>>,
    settings: EmulatorSettings,
    toolbar_layout: OnceLock<ToolbarLayout>,
}

impl<'a> ElementLocator<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self::with_settings(session, EmulatorSettings::default())
    }

    pub fn with_settings(session: &'a Session, settings: EmulatorSettings) -> Self {
        Self { session, scope: None, settings, toolbar_layout: OnceLock::new() }
    }

    /// A locator that searches only below `element`.
    pub fn within(&self, element: Arc<dyn UiElement>) -> ElementLocator<'a> {
        ElementLocator {
            session: self.session,
            scope: Some(element),
            settings: self.settings.clone(),
            toolbar_layout: OnceLock::new(),
        }
    }

    pub fn session(&self) -> &'a Session {
        self.session
    }

    pub fn settings(&self) -> &EmulatorSettings {
        &self.settings
    }

    pub fn scope(&self) -> Option<&Arc<dyn UiElement>> {
        self.scope.as_ref()
    }

    /// Exactly one element must match right now.
    pub fn resolve_single(&self, role: Role) -> EmulatorResult<Arc<dyn UiElement>> {
        let query = role.query().with_cardinality(Cardinality::One);
        Ok(self.session.execute(self.scope(), &query)?.into_single()?)
    }

    /// Looks for a lazily created element, retrying exactly once after the retry delay.
    /// Absence after the retry is not an error.
    pub fn resolve_single_retrying(
        &self,
        role: Role,
    ) -> EmulatorResult<Option<Arc<dyn UiElement>>> {
        let query = role.query().with_cardinality(Cardinality::OptionalOne);
        if let Some(found) = self.session.execute(self.scope(), &query)?.into_optional() {
            return Ok(Some(found));
        }

        debug!(%role, delay = ?self.settings.retry_delay, "element not present yet; retrying once");
        self.session.sleep(self.settings.retry_delay);
        let found = self.session.execute(self.scope(), &query)?.into_optional();
        if found.is_none() {
            info!(%role, "element still absent after retry");
        }
        Ok(found)
    }

    /// All matches in document order; empty when nothing matches.
    pub fn resolve_many(&self, role: Role) -> EmulatorResult<Vec<Arc<dyn UiElement>>> {
        let query = role.query().with_cardinality(Cardinality::Many);
        Ok(self.session.execute(self.scope(), &query)?.into_many())
    }

    /// The `index`-th match of `role` in document order.
    pub fn resolve_nth(&self, role: Role, index: usize) -> EmulatorResult<Arc<dyn UiElement>> {
        let query = role.query().with_cardinality(Cardinality::Many);
        nth(self.session, self.scope(), &query, index)
    }

    /// Resolves `role` the way it is declared: single, lazy or indexed. A lazy role that is
    /// still absent after its retry yields `NotFound`.
    pub fn resolve(&self, role: Role) -> EmulatorResult<Arc<dyn UiElement>> {
        match role.lookup() {
            Lookup::Single => self.resolve_single(role),
            Lookup::Indexed(index) => self.resolve_nth(role, index),
            Lookup::Lazy => self.resolve_single_retrying(role)?.ok_or_else(|| {
                ProviderError::new(ProviderErrorKind::NotFound, format!("{role} is not present"))
                    .into()
            }),
        }
    }

    /// First event → list view → content item → first `eventPhoto` item → its shape.
    pub fn first_photo_in_first_event(&self) -> EmulatorResult<Arc<dyn UiElement>> {
        let event = self.resolve_single(Role::FirstEvent)?;
        let list = nth_child(self.session, &event, "QQuickListView", 0)?;
        let content = nth_child(self.session, &list, "QQuickItem", 0)?;
        let photo_query = ElementQuery::many("QQuickItem")
            .with(attribute_names::OBJECT_NAME, "eventPhoto")
            .children();
        let photo = nth(self.session, Some(&content), &photo_query, 0)?;
        nth_child(self.session, &photo, "UbuntuShape", 0)
    }

    pub fn toolbar(&self) -> EmulatorResult<Toolbar<'a>> {
        Toolbar::resolve(self.session, self.scope())
    }

    /// Layout of the toolbar, probed on first use and reused afterwards.
    pub fn toolbar_layout(&self) -> EmulatorResult<ToolbarLayout> {
        if let Some(layout) = self.toolbar_layout.get() {
            return Ok(*layout);
        }
        let layout = self.toolbar()?.probe_layout()?;
        Ok(*self.toolbar_layout.get_or_init(|| layout))
    }

    pub fn resolve_toolbar_button(&self, index: usize) -> EmulatorResult<Arc<dyn UiElement>> {
        let layout = self.toolbar_layout()?;
        let button = self.toolbar()?.button(layout, index)?;
        debug!(index, %layout, button = %button.describe(), "toolbar button resolved");
        Ok(button)
    }

    pub fn resolve_toolbar_cancel_icon(&self) -> EmulatorResult<Arc<dyn UiElement>> {
        let layout = self.toolbar_layout()?;
        self.toolbar()?.cancel_icon(layout)
    }
}
