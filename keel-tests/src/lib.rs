use async_stream::try_stream;
use keel_core::{Error, Executor, Result, RowLabeled, Value, stream::Stream};
use log::LevelFilter;
use std::{collections::VecDeque, env, sync::Arc};

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Outcome of the next query sent to a `MockExecutor`.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Rows(Vec<RowLabeled>),
    Error(String),
}

/// Executor answering with prepared responses, in order, and recording the queries it receives.
#[derive(Default, Debug)]
pub struct MockExecutor {
    pub queries: Vec<String>,
    responses: VecDeque<MockResponse>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_rows(mut self, rows: Vec<RowLabeled>) -> Self {
        self.responses.push_back(MockResponse::Rows(rows));
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.responses.push_back(MockResponse::Error(message.into()));
        self
    }

    pub fn last_query(&self) -> Option<&str> {
        self.queries.last().map(String::as_str)
    }
}

impl Executor for MockExecutor {
    fn fetch(&mut self, query: String) -> impl Stream<Item = Result<RowLabeled>> + Send {
        self.queries.push(query.clone());
        let response = self.responses.pop_front();
        try_stream! {
            match response {
                Some(MockResponse::Rows(rows)) => {
                    for row in rows {
                        yield row;
                    }
                }
                Some(MockResponse::Error(message)) => Err::<(), Error>(Error::msg(message))?,
                None => Err::<(), Error>(Error::msg(format!(
                    "No response prepared for the query:\n{}",
                    query
                )))?,
            }
        }
    }
}

/// Single row with the given labels.
pub fn row(labels: &[&str], values: Vec<Value>) -> RowLabeled {
    RowLabeled::new(
        labels.iter().map(|v| v.to_string()).collect(),
        values.into_boxed_slice(),
    )
}

/// Rows sharing the same labels.
pub fn rows(labels: &[&str], values: Vec<Vec<Value>>) -> Vec<RowLabeled> {
    let labels: Arc<[String]> = labels.iter().map(|v| v.to_string()).collect();
    values
        .into_iter()
        .map(|v| RowLabeled::new(labels.clone(), v.into_boxed_slice()))
        .collect()
}
