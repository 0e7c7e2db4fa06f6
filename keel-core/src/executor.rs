use crate::{Result, RowLabeled, stream::Stream};

/// Connection side collaborator running the introspection queries.
///
/// Connection management lives outside of this crate: anything able to send a query and stream
/// back labeled rows can be used to describe tables.
pub trait Executor: Send {
    /// Execute the query and returns the rows.
    fn fetch(&mut self, query: String) -> impl Stream<Item = Result<RowLabeled>> + Send;
}

impl<E: Executor> Executor for &mut E {
    fn fetch(&mut self, query: String) -> impl Stream<Item = Result<RowLabeled>> + Send {
        (**self).fetch(query)
    }
}
