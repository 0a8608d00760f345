//! Logical UI roles of the gallery and the queries that find them.
//!
//! Test code refers to roles by name; the type names and object names they map to are an
//! implementation detail of the application and may change between releases.

use crate::error::ParseRoleError;
use gallery_pilot_core::ui::{ElementQuery, attribute_names};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// How a role's query result is turned into a single element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// Exactly one element must exist right now.
    Single,
    /// The element is created on demand; absent after one retry is not an error.
    Lazy,
    /// Pick the n-th element of all matches in document order.
    Indexed(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    QmlView,
    PhotoViewerLoader,
    PhotoViewer,
    TabsBar,
    AlbumsTabButton,
    MainScreen,
    DeleteDialog,
    DeleteDialogConfirm,
    DeleteDialogCancel,
    FirstEvent,
    FirstAlbum,
    AlbumEditorAnimated,
    AlbumEditor,
    AlbumTitleField,
    AlbumSubtitleField,
    AlbumCoverImage,
    AddPhotosIcon,
}

impl Role {
    pub const ALL: [Role; 17] = [
        Role::QmlView,
        Role::PhotoViewerLoader,
        Role::PhotoViewer,
        Role::TabsBar,
        Role::AlbumsTabButton,
        Role::MainScreen,
        Role::DeleteDialog,
        Role::DeleteDialogConfirm,
        Role::DeleteDialogCancel,
        Role::FirstEvent,
        Role::FirstAlbum,
        Role::AlbumEditorAnimated,
        Role::AlbumEditor,
        Role::AlbumTitleField,
        Role::AlbumSubtitleField,
        Role::AlbumCoverImage,
        Role::AddPhotosIcon,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::QmlView => "qml-view",
            Role::PhotoViewerLoader => "photo-viewer-loader",
            Role::PhotoViewer => "photo-viewer",
            Role::TabsBar => "tabs-bar",
            Role::AlbumsTabButton => "albums-tab-button",
            Role::MainScreen => "main-screen",
            Role::DeleteDialog => "delete-dialog",
            Role::DeleteDialogConfirm => "delete-dialog-confirm",
            Role::DeleteDialogCancel => "delete-dialog-cancel",
            Role::FirstEvent => "first-event",
            Role::FirstAlbum => "first-album",
            Role::AlbumEditorAnimated => "album-editor-animated",
            Role::AlbumEditor => "album-editor",
            Role::AlbumTitleField => "album-title-field",
            Role::AlbumSubtitleField => "album-subtitle-field",
            Role::AlbumCoverImage => "album-cover-image",
            Role::AddPhotosIcon => "add-photos-icon",
        }
    }

    /// The type and attribute constraints identifying this role. The cardinality is set by
    /// the locator operation that runs it.
    pub fn query(self) -> ElementQuery {
        match self {
            Role::QmlView => ElementQuery::single("QQuickView"),
            Role::PhotoViewerLoader => {
                ElementQuery::single("QQuickLoader").with_object_name("photoViewerLoader")
            }
            Role::PhotoViewer => {
                ElementQuery::optional("PhotoViewer").with_object_name("photoViewer")
            }
            Role::TabsBar => ElementQuery::single("NewTabBar"),
            Role::AlbumsTabButton => {
                ElementQuery::single("AbstractButton").with(attribute_names::BUTTON_INDEX, 0)
            }
            Role::MainScreen => ElementQuery::single("MainScreen").with_object_name("overview"),
            Role::DeleteDialog => {
                ElementQuery::optional("DeleteDialog").with_object_name("deleteDialog")
            }
            Role::DeleteDialogConfirm => {
                ElementQuery::single("Button").with_object_name("deleteDialogYes").visible()
            }
            Role::DeleteDialogCancel => {
                ElementQuery::single("Button").with_object_name("deleteDialogNo").visible()
            }
            Role::FirstEvent => {
                ElementQuery::single("OrganicMediaList").with_object_name("organicEventItem0")
            }
            Role::FirstAlbum => {
                ElementQuery::many("CheckerboardDelegate").with_object_name("checkerboardDelegate")
            }
            Role::AlbumEditorAnimated => ElementQuery::optional("AlbumEditorAnimated"),
            Role::AlbumEditor => {
                ElementQuery::single("AlbumEditor").with_object_name("mainAlbumEditor")
            }
            Role::AlbumTitleField => {
                ElementQuery::many("TextEditOnClick").with_object_name("albumTitleField")
            }
            Role::AlbumSubtitleField => {
                ElementQuery::many("TextEditOnClick").with_object_name("albumSubtitleField")
            }
            Role::AlbumCoverImage => {
                ElementQuery::many("QQuickImage").with_object_name("albumCoverImage")
            }
            Role::AddPhotosIcon => {
                ElementQuery::single("QQuickImage")
                    .with_object_name("albumCoverAddPhotosImage")
                    .visible()
            }
        }
    }

    pub fn lookup(self) -> Lookup {
        match self {
            Role::PhotoViewer | Role::DeleteDialog | Role::AlbumEditorAnimated => Lookup::Lazy,
            Role::FirstAlbum
            | Role::AlbumTitleField
            | Role::AlbumSubtitleField
            | Role::AlbumCoverImage => Lookup::Indexed(0),
            _ => Lookup::Single,
        }
    }

    pub fn is_lazy(self) -> bool {
        self.lookup() == Lookup::Lazy
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ParseRoleError(value.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_pilot_core::ui::{Cardinality, UiValue};
    use rstest::rstest;

    #[rstest]
    fn names_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert_eq!("Delete-Dialog".parse::<Role>().unwrap(), Role::DeleteDialog);
        assert_eq!("toolbar".parse::<Role>().unwrap_err(), ParseRoleError("toolbar".into()));
    }

    #[rstest]
    #[case(Role::DeleteDialogConfirm, "Button", "deleteDialogYes")]
    #[case(Role::AddPhotosIcon, "QQuickImage", "albumCoverAddPhotosImage")]
    fn visible_roles_constrain_visibility(
        #[case] role: Role,
        #[case] type_name: &str,
        #[case] object_name: &str,
    ) {
        let query = role.query();
        assert_eq!(query.type_name(), type_name);
        assert_eq!(
            query.constraints().get(attribute_names::OBJECT_NAME),
            Some(&UiValue::from(object_name))
        );
        assert_eq!(query.constraints().get(attribute_names::VISIBLE), Some(&UiValue::Bool(true)));
    }

    #[rstest]
    fn indexed_roles_query_many() {
        for role in Role::ALL {
            if let Lookup::Indexed(_) = role.lookup() {
                assert_eq!(role.query().cardinality(), Cardinality::Many, "{role}");
            }
        }
    }

    #[rstest]
    fn lazy_roles() {
        let lazy: Vec<Role> = Role::ALL.into_iter().filter(|role| role.is_lazy()).collect();
        assert_eq!(lazy, vec![Role::PhotoViewer, Role::DeleteDialog, Role::AlbumEditorAnimated]);
    }
}
