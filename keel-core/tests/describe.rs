#[cfg(test)]
mod tests {
    use keel_core::{
        ColumnDefinition, CustomType, Dialect, DialectOptions, GenericDialect, Type,
        ValidationError, Value, describe,
    };
    use keel_tests::{MockExecutor, init_logs, rows};
    use std::sync::Arc;

    const LABELS: &[&str] = &[
        "column_name",
        "column_default",
        "data_type",
        "is_nullable",
        "character_maximum_length",
        "datetime_precision",
    ];

    fn users() -> MockExecutor {
        MockExecutor::new().with_rows(rows(
            LABELS,
            vec![
                vec![
                    "id".into(),
                    Value::Null,
                    "integer".into(),
                    "NO".into(),
                    Value::Null,
                    Value::Null,
                ],
                vec![
                    "name".into(),
                    "'anonymous'".into(),
                    "character varying".into(),
                    "NO".into(),
                    Value::Int32(64),
                    Value::Null,
                ],
                vec![
                    "created_at".into(),
                    "CURRENT_TIMESTAMP".into(),
                    "timestamp".into(),
                    "YES".into(),
                    Value::Null,
                    "6".into(),
                ],
                vec![
                    "location".into(),
                    Value::Null,
                    "geometry".into(),
                    "YES".into(),
                    Value::Null,
                    Value::Null,
                ],
            ],
        ))
    }

    #[tokio::test]
    async fn describe_table() {
        init_logs();
        let dialect = GenericDialect::new();
        let mut executor = users();
        let columns = dialect
            .describe(&mut executor, "users")
            .await
            .expect("Users should be described");
        assert_eq!(
            executor.last_query(),
            Some(
                "SELECT column_name,column_default,data_type,is_nullable,character_maximum_length,datetime_precision FROM INFORMATION_SCHEMA.COLUMNS WHERE table_name = 'users'"
            )
        );
        assert_eq!(
            columns.iter().map(|c| c.name()).collect::<Vec<_>>(),
            ["id", "name", "created_at", "location"]
        );
        assert_eq!(*columns[0].column_type(), Type::Integer);
        assert!(!columns[0].nullable());
        assert!(!columns[0].has_default());
        assert_eq!(
            *columns[1].column_type(),
            Type::VarChar {
                max_length: Some(64)
            }
        );
        assert_eq!(columns[1].default_expression(), Some("'anonymous'"));
        assert_eq!(
            *columns[2].column_type(),
            Type::DateTime { precision: Some(6) }
        );
        assert!(columns[2].nullable());
        assert_eq!(*columns[3].column_type(), Type::Text);
        assert_eq!(columns[3].definition().column_type, "geometry");
    }

    #[tokio::test]
    async fn describe_with_schema() {
        init_logs();
        let dialect = GenericDialect::new();
        let mut executor = users();
        let columns = describe(&dialect as &dyn Dialect, &mut executor, "app.users")
            .await
            .expect("Users should be described");
        assert_eq!(columns.len(), 4);
        assert_eq!(
            executor.last_query(),
            Some(
                "SELECT column_name,column_default,data_type,is_nullable,character_maximum_length,datetime_precision FROM INFORMATION_SCHEMA.COLUMNS WHERE table_name = 'users' AND table_schema = 'app'"
            )
        );
    }

    #[tokio::test]
    async fn describe_quotes_table_name() {
        let dialect = GenericDialect::new();
        let mut executor = users();
        dialect
            .describe(&mut executor, "o'brien")
            .await
            .expect("Rows were prepared");
        assert!(
            executor
                .last_query()
                .is_some_and(|q| q.ends_with("WHERE table_name = 'o''brien'"))
        );
    }

    #[tokio::test]
    async fn describe_unknown_table() {
        init_logs();
        let dialect = GenericDialect::new();
        let mut executor = MockExecutor::new().with_rows(vec![]);
        let error = dialect
            .describe(&mut executor, "app.users")
            .await
            .expect_err("No rows means no table");
        assert_eq!(error.to_string(), "Unknown table app.users");
    }

    #[tokio::test]
    async fn describe_executor_error() {
        init_logs();
        let dialect = GenericDialect::new();
        let mut executor = MockExecutor::new().with_error("connection lost");
        let error = dialect
            .describe(&mut executor, "users")
            .await
            .expect_err("The executor failed");
        assert_eq!(error.to_string(), "connection lost");
        assert_eq!(executor.queries.len(), 1);
    }

    #[tokio::test]
    async fn describe_missing_column_name() {
        let dialect = GenericDialect::new();
        let mut executor = MockExecutor::new().with_rows(rows(
            &["data_type"],
            vec![vec!["integer".into()]],
        ));
        let error = dialect
            .describe(&mut executor, "users")
            .await
            .expect_err("Rows without column_name are malformed");
        assert!(error.to_string().contains("column_name"), "{error:#}");
    }

    #[derive(Debug)]
    struct Named(&'static str);
    impl CustomType for Named {
        fn name(&self) -> &str {
            self.0
        }
        fn validate(&self, _value: &Value) -> Result<(), ValidationError> {
            Ok(())
        }
    }

    fn geometry_and_integer(definition: &ColumnDefinition, _: &DialectOptions) -> Option<Type> {
        matches!(definition.data_type.as_str(), "geometry" | "integer")
            .then(|| Type::custom(Named("t1")))
    }

    fn geometry(definition: &ColumnDefinition, _: &DialectOptions) -> Option<Type> {
        (definition.data_type == "geometry").then(|| Type::custom(Named("t2")))
    }

    #[tokio::test]
    async fn describe_with_registered_types() {
        init_logs();
        let dialect: Box<dyn Dialect> = Box::new(GenericDialect::new());
        assert!(dialect.register_type(Arc::new(geometry_and_integer)));
        assert!(dialect.register_type(Arc::new(geometry)));

        let mut executor = users();
        let columns = describe(dialect.as_ref(), &mut executor, "users")
            .await
            .expect("Users should be described");
        let names: Vec<_> = columns.iter().map(|c| c.column_type().name()).collect();
        assert_eq!(names[3], "t2");
        assert_eq!(names[0], "t1");
        assert_eq!(
            *columns[1].column_type(),
            Type::VarChar {
                max_length: Some(64)
            }
        );

        dialect.reset_registered_types();
        let mut executor = users();
        let columns = describe(dialect.as_ref(), &mut executor, "users")
            .await
            .expect("Users should be described");
        assert_eq!(*columns[0].column_type(), Type::Integer);
        assert_eq!(*columns[3].column_type(), Type::Text);
    }
}
