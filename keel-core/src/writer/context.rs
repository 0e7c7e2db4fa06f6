use crate::DialectOptions;

/// Statement part being written. Keyed conditions compare a null with `IS NULL` inside a WHERE
/// clause only.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    #[default]
    None,
    SqlWhere,
}

#[derive(Debug, Clone, Copy)]
pub struct Context<'o> {
    pub fragment: Fragment,
    pub options: &'o DialectOptions,
}

impl<'o> Context<'o> {
    pub fn new(fragment: Fragment, options: &'o DialectOptions) -> Self {
        Self { fragment, options }
    }

    pub fn switch_fragment(&self, fragment: Fragment) -> Context<'o> {
        Context { fragment, ..*self }
    }
}
