/// A lightweight snapshot of the scroll geometry.
///
/// This is useful for restoring a list's position across mode switches or sessions without
/// coupling the engine to any UI framework. With `feature = "serde"`, this type implements
/// `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameState {
    pub scroll_offset: f32,
    pub viewport_extent: f32,
}
