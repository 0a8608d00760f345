use crate::error::{EmulatorError, EmulatorResult};
use crate::roles::Role;
use gallery_pilot_core::ui::{ElementQuery, UiElement};
use gallery_pilot_runtime::Session;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tracing::debug;

/// The two toolbar generations the gallery has shipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToolbarLayout {
    /// Every button sits inside its own `QQuickLoader`.
    NewLayout,
    /// Buttons are direct children of the row.
    OldLayout,
}

impl ToolbarLayout {
    /// Inspects the button row: any `QQuickLoader` child means the new layout.
    pub fn probe(session: &Session, row: &Arc<dyn UiElement>) -> EmulatorResult<Self> {
        let loaders = session.execute(Some(row), &ElementQuery::many("QQuickLoader").children())?;
        let layout =
            if loaders.is_empty() { ToolbarLayout::OldLayout } else { ToolbarLayout::NewLayout };
        debug!(%layout, loaders = loaders.len(), "toolbar layout probed");
        Ok(layout)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToolbarLayout::NewLayout => "new",
            ToolbarLayout::OldLayout => "old",
        }
    }
}

impl Display for ToolbarLayout {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved toolbar skeleton: `Toolbar` → `QQuickItem` → `QQuickRow`.
pub struct Toolbar<'a> {
    session: &'a Session,
    element: Arc<dyn UiElement>,
    item: Arc<dyn UiElement>,
    row: Arc<dyn UiElement>,
}

impl<'a> Toolbar<'a> {
    /// Walks from the main screen down to the button row.
    pub fn resolve(
        session: &'a Session,
        scope: Option<&Arc<dyn UiElement>>,
    ) -> EmulatorResult<Self> {
        let overview = session.execute(scope, &Role::MainScreen.query())?.into_single()?;
        let element = nth_child(session, &overview, "Toolbar", 0)?;
        let item = nth_child(session, &element, "QQuickItem", 0)?;
        let row = nth_child(session, &item, "QQuickRow", 0)?;
        Ok(Self { session, element, item, row })
    }

    pub fn element(&self) -> &Arc<dyn UiElement> {
        &self.element
    }

    pub fn probe_layout(&self) -> EmulatorResult<ToolbarLayout> {
        ToolbarLayout::probe(self.session, &self.row)
    }

    pub fn button(
        &self,
        layout: ToolbarLayout,
        index: usize,
    ) -> EmulatorResult<Arc<dyn UiElement>> {
        match layout {
            ToolbarLayout::NewLayout => {
                let loader = nth_child(self.session, &self.row, "QQuickLoader", index)?;
                nth_child(self.session, &loader, "Button", 0)
            }
            ToolbarLayout::OldLayout => nth_child(self.session, &self.row, "Button", index),
        }
    }

    /// The cancel icon sits in the item, next to the row. Its loader wrapping follows the
    /// layout probed from the row; the two toolbar generations never mix wrapped and bare
    /// buttons.
    pub fn cancel_icon(&self, layout: ToolbarLayout) -> EmulatorResult<Arc<dyn UiElement>> {
        match layout {
            ToolbarLayout::NewLayout => {
                let loader = nth_child(self.session, &self.item, "QQuickLoader", 0)?;
                nth_child(self.session, &loader, "Button", 0)
            }
            ToolbarLayout::OldLayout => nth_child(self.session, &self.item, "Button", 0),
        }
    }
}

/// The `index`-th direct child of `parent` with the given type name.
pub(crate) fn nth_child(
    session: &Session,
    parent: &Arc<dyn UiElement>,
    type_name: &str,
    index: usize,
) -> EmulatorResult<Arc<dyn UiElement>> {
    let query = ElementQuery::many(type_name).children();
    nth(session, Some(parent), &query, index)
}

pub(crate) fn nth(
    session: &Session,
    scope: Option<&Arc<dyn UiElement>>,
    query: &ElementQuery,
    index: usize,
) -> EmulatorResult<Arc<dyn UiElement>> {
    let mut matches = session.execute(scope, query)?.into_many();
    let len = matches.len();
    if index >= len {
        return Err(EmulatorError::IndexOutOfRange { query: query.to_string(), index, len });
    }
    Ok(matches.swap_remove(index))
}
