#[cfg(test)]
mod tests {
    use keel_core::{Column, ColumnDefinition, ErrorKind, Type, Validator, Value, ValueMap};
    use std::borrow::Cow;

    fn columns() -> Vec<Column> {
        vec![
            Column::new(ColumnDefinition::new("id", "int").auto_increment(true), Type::Integer),
            Column::new(
                ColumnDefinition::new("name", "varchar(5)").max_length(5),
                Type::VarChar {
                    max_length: Some(5),
                },
            ),
            Column::new(
                ColumnDefinition::new("note", "text").nullable(true),
                Type::Text,
            ),
            Column::new(
                ColumnDefinition::new("score", "numeric").default_value("0"),
                Type::Number,
            ),
        ]
    }

    #[test]
    fn column_flags() {
        let columns = columns();
        assert!(!columns[0].nullable());
        assert!(columns[0].has_default());
        assert_eq!(columns[0].default_expression(), None);
        assert!(!columns[1].nullable());
        assert!(!columns[1].has_default());
        assert!(columns[2].nullable());
        assert!(!columns[2].has_default());
        assert!(columns[3].has_default());
        assert_eq!(columns[3].default_expression(), Some("0"));
        assert_eq!(columns[1].definition().column_type, "varchar(5)");
        assert_eq!(columns[1].column_type().name(), "varchar");
    }

    #[test]
    fn validate_null() {
        let validator = Validator::new(columns());
        assert!(validator.validate("id", &Value::Null).is_ok());
        assert!(validator.validate("note", &Value::Null).is_ok());
        assert!(validator.validate("score", &Value::Null).is_ok());
        let error = validator
            .validate("name", &Value::Null)
            .expect_err("Not nullable");
        assert_eq!(error.kind(), ErrorKind::NotNullable);
        assert_eq!(error.column(), Some("name"));
        assert_eq!(error.message(), "name does not allow null values");
    }

    #[test]
    fn validate_wraps_type_errors() {
        let validator = Validator::new(columns());
        assert!(validator.validate("name", &"Alice".into()).is_ok());
        let error = validator
            .validate("name", &"Bernard".into())
            .expect_err("Too long");
        assert_eq!(error.kind(), ErrorKind::NotValid);
        assert_eq!(error.column(), Some("name"));
        assert_eq!(error.previous(), Some("Bernard is too long (max: 5)"));
        assert_eq!(
            error.message(),
            "Value not valid for name (Caused by: Bernard is too long (max: 5))"
        );
        assert_eq!(error.to_string(), error.message());

        let error = validator
            .validate("id", &"abc".into())
            .expect_err("Not a number");
        assert_eq!(
            error.to_string(),
            "Value not valid for id (Caused by: abc is not numeric)"
        );
    }

    #[test]
    fn validate_unknown_column() {
        let validator = Validator::new(columns());
        let error = validator
            .validate("nope", &1.into())
            .expect_err("Unknown column");
        assert_eq!(error.kind(), ErrorKind::UnknownColumn);
        assert_eq!(error.kind().code(), "UNKNOWN_COLUMN");
        assert_eq!(error.message(), "Unknown column nope");
    }

    #[test]
    fn validate_row() {
        let validator = Validator::new(columns());
        let row: ValueMap = [
            (Cow::Borrowed("id"), Value::from(1)),
            (Cow::Borrowed("name"), Value::from("Bob")),
            (Cow::Borrowed("score"), Value::from("1.5")),
        ]
        .into_iter()
        .collect();
        assert!(validator.validate_row(&row).is_ok());

        let row: ValueMap = [
            (Cow::Borrowed("id"), Value::from("x")),
            (Cow::Borrowed("name"), Value::Null),
            (Cow::Borrowed("note"), Value::from("fine")),
            (Cow::Borrowed("extra"), Value::from(true)),
        ]
        .into_iter()
        .collect();
        let errors = validator.validate_row(&row).expect_err("Three errors");
        assert_eq!(
            errors.iter().map(|e| e.kind()).collect::<Vec<_>>(),
            [
                ErrorKind::NotValid,
                ErrorKind::NotNullable,
                ErrorKind::UnknownColumn
            ]
        );
    }

    #[test]
    fn validator_columns() {
        let validator: Validator = columns().into_iter().collect();
        assert_eq!(validator.len(), 4);
        assert!(!validator.is_empty());
        assert!(Validator::default().is_empty());
        assert_eq!(
            validator.columns().map(Column::name).collect::<Vec<_>>(),
            ["id", "name", "note", "score"]
        );
        assert_eq!(
            validator.column("note").map(Column::nullable),
            Some(true)
        );
        assert!(validator.column("missing").is_none());
        let names: Vec<String> = validator
            .into_iter()
            .map(|c| c.name().to_owned())
            .collect();
        assert_eq!(names, ["id", "name", "note", "score"]);
    }
}
