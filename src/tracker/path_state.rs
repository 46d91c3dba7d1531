/// Lifecycle of a trajectory while frames are being folded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathState {
    /// Tail lies in the most recent frame and may still be extended
    #[default]
    Open,
    /// Missed a frame; never extended again
    Closed,
}
