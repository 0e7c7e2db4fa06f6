#[cfg(test)]
mod tests {
    use indoc::indoc;
    use keel_core::{AllowedValues, Dialect, DialectOptions, Type, Value, ValueMap, raw};
    use keel_mysql::MySQLDialect;
    use keel_tests::{MockExecutor, init_logs, rows};
    use std::borrow::Cow;
    use time::macros::datetime;

    const LABELS: &[&str] = &["Field", "Type", "Null", "Key", "Default", "Extra"];

    fn describe_row(
        field: &str,
        native: &str,
        null: &str,
        default: Value,
        extra: &str,
    ) -> Vec<Value> {
        vec![
            field.into(),
            native.into(),
            null.into(),
            "".into(),
            default,
            extra.into(),
        ]
    }

    #[tokio::test]
    async fn describe_query() {
        init_logs();
        let dialect = MySQLDialect::new();
        let id = || rows(LABELS, vec![describe_row("id", "int(11)", "NO", Value::Null, "")]);
        let mut executor = MockExecutor::new().with_rows(id()).with_rows(id());
        dialect
            .describe(&mut executor, "users")
            .await
            .expect("Described");
        assert_eq!(executor.last_query(), Some("DESCRIBE `users`"));
        dialect
            .describe(&mut executor, "app.users")
            .await
            .expect("Described");
        assert_eq!(executor.last_query(), Some("DESCRIBE `app`.`users`"));

        let dialect =
            MySQLDialect::with_options(MySQLDialect::DEFAULT_OPTIONS.with_quoting_character('"'));
        let mut executor = MockExecutor::new().with_rows(id());
        dialect
            .describe(&mut executor, "app.users")
            .await
            .expect("Described");
        assert_eq!(executor.last_query(), Some(r#"DESCRIBE "app"."users""#));
    }

    #[tokio::test]
    async fn describe_columns() {
        init_logs();
        let dialect = MySQLDialect::new();
        let mut executor = MockExecutor::new().with_rows(rows(
            LABELS,
            vec![
                describe_row("id", "int(11) unsigned", "NO", Value::Null, "auto_increment"),
                describe_row("name", "varchar(40)", "NO", Value::Null, ""),
                describe_row("bio", "mediumtext", "YES", Value::Null, ""),
                describe_row("price", "decimal(10,2)", "NO", "0.00".into(), ""),
                describe_row("ratio", "double", "YES", Value::Null, ""),
                describe_row("size", "enum('small','large','o''sized')", "NO", "small".into(), ""),
                describe_row("flags", "set('read','write')", "YES", Value::Null, ""),
                describe_row(
                    "created_at",
                    "timestamp(3)",
                    "NO",
                    "CURRENT_TIMESTAMP(3)".into(),
                    "DEFAULT_GENERATED",
                ),
                describe_row("starts", "time", "YES", Value::Null, ""),
                describe_row("data", "json", "YES", Value::Null, ""),
                describe_row("active", "tinyint(1)", "NO", "1".into(), ""),
                describe_row("shape", "geometry", "YES", Value::Null, ""),
            ],
        ));
        let columns = dialect
            .describe(&mut executor, "products")
            .await
            .expect("Described");
        let types: Vec<_> = columns.iter().map(|c| c.column_type().clone()).collect();
        assert_eq!(
            types,
            [
                Type::Integer,
                Type::VarChar {
                    max_length: Some(40)
                },
                Type::Text,
                Type::Number,
                Type::Number,
                Type::Enum(AllowedValues::new(["small", "large", "o'sized"])),
                Type::Set(AllowedValues::new(["read", "write"])),
                Type::DateTime { precision: Some(3) },
                Type::Time { precision: None },
                Type::Json,
                Type::Integer,
                Type::Text,
            ]
        );

        let id = &columns[0];
        assert_eq!(id.name(), "id");
        assert!(id.definition().auto_increment);
        assert!(id.has_default());
        assert!(!id.nullable());
        assert_eq!(id.definition().data_type, "int");
        assert_eq!(id.definition().column_type, "int(11) unsigned");

        assert!(!columns[1].has_default());
        assert!(columns[2].nullable());
        assert_eq!(columns[3].default_expression(), Some("0.00"));
        assert!(!columns[7].definition().auto_increment);
        assert_eq!(
            columns.iter().map(|c| c.name()).collect::<Vec<_>>(),
            [
                "id",
                "name",
                "bio",
                "price",
                "ratio",
                "size",
                "flags",
                "created_at",
                "starts",
                "data",
                "active",
                "shape"
            ]
        );
    }

    #[tokio::test]
    async fn describe_failure_is_propagated() {
        init_logs();
        let dialect = MySQLDialect::new();
        let mut executor =
            MockExecutor::new().with_error("Table 'app.missing' doesn't exist");
        let error = dialect
            .describe(&mut executor, "app.missing")
            .await
            .expect_err("Unknown table");
        assert_eq!(error.to_string(), "Table 'app.missing' doesn't exist");
    }

    fn join_updates() -> ValueMap {
        [(Cow::Borrowed("foo"), raw("names.foo"))]
            .into_iter()
            .collect()
    }

    #[test]
    fn update_join() {
        let dialect =
            MySQLDialect::with_options(MySQLDialect::DEFAULT_OPTIONS.with_quoting_character('"'));
        assert_eq!(
            dialect
                .update(
                    "examples",
                    &["examples.id = 42".into()],
                    &join_updates(),
                    &["JOIN names ON exampleId = examples.id"],
                )
                .expect("Joins are supported"),
            "UPDATE examples JOIN names ON exampleId = examples.id SET \"foo\" = names.foo WHERE examples.id = 42"
        );

        let dialect = MySQLDialect::new();
        assert_eq!(
            dialect
                .update(
                    "examples",
                    &[("examples.id", 42).into()],
                    &join_updates(),
                    &[indoc! {"
                        LEFT JOIN names
                        ON exampleId = examples.id
                    "}],
                )
                .expect("Any join is written verbatim"),
            "UPDATE examples LEFT JOIN names\nON exampleId = examples.id SET `foo` = names.foo WHERE `examples`.`id` = 42"
        );
    }

    #[test]
    fn update_plain() {
        let dialect = MySQLDialect::new();
        let updates: ValueMap = [
            (Cow::Borrowed("name"), Value::from("Bob")),
            (Cow::Borrowed("active"), Value::from(false)),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            dialect
                .update("app.users", &[("id", 1).into()], &updates, &[])
                .expect("Plain update"),
            "UPDATE `app`.`users` SET `name` = 'Bob', `active` = 0 WHERE `id` = 1"
        );
    }

    #[test]
    fn insert_and_delete() {
        let dialect = MySQLDialect::new();
        let rows: Vec<ValueMap> = vec![
            [(Cow::Borrowed("a"), Value::from(1))].into_iter().collect(),
            [(Cow::Borrowed("b"), Value::from("x"))].into_iter().collect(),
        ];
        assert_eq!(
            dialect.insert("t", &rows),
            "INSERT INTO `t` (`a`,`b`) VALUES (1,NULL),(NULL,'x')"
        );
        assert_eq!(
            dialect.delete("t", &[("a", 1).into()]),
            "DELETE FROM `t` WHERE `a` = 1"
        );
        assert_eq!(
            dialect.composite_in(&["a", "b"], &[vec![1.into(), 2.into()]], true),
            "(a,b) NOT IN ((1,2))"
        );
    }

    #[test]
    fn escaping() {
        let dialect = MySQLDialect::new();
        assert_eq!(dialect.escape_identifier("we`ird"), "`we``ird`");
        assert_eq!(dialect.escape_identifier("app.users"), "`app`.`users`");
        assert_eq!(dialect.escape_value(&"it's".into()), r"'it\'s'");
        assert_eq!(dialect.escape_value(&r"C:\temp".into()), r"'C:\\temp'");
        assert_eq!(dialect.escape_value(&"a\nb\0".into()), r"'a\nb\0'");
        assert_eq!(dialect.escape_value(&"ünï".into()), "'ünï'");
        assert_eq!(dialect.escape_value(&true.into()), "1");
        assert_eq!(dialect.escape_value(&f64::NAN.into()), "NULL");
        assert_eq!(dialect.escape_value(&f64::INFINITY.into()), "1.0e+10000");
        assert_eq!(
            dialect.escape_value(&f64::NEG_INFINITY.into()),
            "-1.0e+10000"
        );
        assert_eq!(
            dialect.escape_value(&datetime!(2024-03-09 07:05:01).into()),
            "'2024-03-09 07:05:01'"
        );
        assert_eq!(
            dialect.escape_value(&datetime!(2024-03-09 07:05:01.25).into()),
            "'2024-03-09 07:05:01.250000'"
        );
        assert_eq!(
            dialect.escape_value(&datetime!(2024-03-09 01:05:01 +2).into()),
            "'2024-03-08 23:05:01'"
        );
        assert_eq!(
            dialect.escape_value(&Box::<[u8]>::from([0xca, 0xfe]).into()),
            "X'CAFE'"
        );
    }

    #[test]
    fn options() {
        let dialect = MySQLDialect::new();
        assert_eq!(dialect.name(), "mysql");
        assert_eq!(dialect.options().quoting_character, '`');
        assert_eq!(
            *MySQLDialect::with_options(DialectOptions::default()).options(),
            DialectOptions::default()
        );
    }
}
