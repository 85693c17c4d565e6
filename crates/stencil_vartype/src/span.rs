use std::fmt::Debug;

// byte positions relative to the beginning of the input. declarations are one-liners, u16 is
// plenty.
#[derive(PartialEq, Eq, Clone, Copy)]
pub struct Span {
    pub start: u16,
    pub end: u16,
}

// NOTE: compact Debug keeps expect-test snapshots readable.
impl Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("Span {{ {}, {} }}", self.start, self.end))
    }
}

impl Span {
    pub fn new(start: u16, end: u16) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }
}
