/// Attribute keys exposed by the gallery's QML scene graph, spelled as the toolkit reports them.
pub mod names {
    pub const OBJECT_NAME: &str = "objectName";
    pub const VISIBLE: &str = "visible";
    pub const GLOBAL_RECT: &str = "globalRect";
    pub const IS_OPEN: &str = "isOpen";
    pub const ANIMATION_RUNNING: &str = "animationRunning";
    pub const BUTTON_INDEX: &str = "buttonIndex";

    /// Attributes every element answers, independent of its type.
    pub const INTRINSIC: &[&str] = &[OBJECT_NAME, VISIBLE, GLOBAL_RECT];
}
