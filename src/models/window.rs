/// Date filter bounds, compared as text against the stored `YYYY-MM-DD`
/// date column. Month windows carry a literal `-31` upper bound that is
/// inclusive; year windows exclude their upper bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWindow {
    pub start: String,
    pub end: String,
    pub end_inclusive: bool,
}
