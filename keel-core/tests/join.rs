#[cfg(test)]
mod tests {
    use indoc::indoc;
    use keel_core::{JoinClause, JoinParseError};

    #[test]
    fn join_simple() {
        let join = JoinClause::parse("JOIN names ON exampleId = examples.id").expect("Valid join");
        assert_eq!(join, JoinClause::new("names", "exampleId = examples.id"));
        assert_eq!(join.to_string(), "JOIN names ON exampleId = examples.id");

        let join: JoinClause = "  inner join names on names.id=examples.nameId  "
            .parse()
            .expect("Valid join");
        assert_eq!(join, JoinClause::new("names", "names.id=examples.nameId"));
    }

    #[test]
    fn join_alias() {
        let join = JoinClause::parse("JOIN names n ON n.id = e.nameId").expect("Valid join");
        assert_eq!(join.table, "names n");
        assert_eq!(join.on, "n.id = e.nameId");

        let join = JoinClause::parse(r#"Join "my schema"."the names" AS n oN n.id = 1"#)
            .expect("Valid join");
        assert_eq!(join.table, r#""my schema"."the names" AS n"#);
        assert_eq!(join.on, "n.id = 1");

        let join = JoinClause::parse("JOIN `odd``name` ON x = y").expect("Valid join");
        assert_eq!(join.table, "`odd``name`");
    }

    #[test]
    fn join_multiline_condition() {
        let join = JoinClause::parse(indoc! {"
            JOIN names
            ON names.id = examples.nameId
              AND names.deleted = 0
        "})
        .expect("Valid join");
        assert_eq!(join.table, "names");
        assert_eq!(
            join.on,
            "names.id = examples.nameId\n  AND names.deleted = 0"
        );
    }

    #[test]
    fn join_not_inner() {
        for (clause, kind) in [
            ("LEFT JOIN names ON a = b", "LEFT"),
            ("left outer join names on a = b", "LEFT"),
            ("RIGHT JOIN names ON a = b", "RIGHT"),
            ("FULL OUTER JOIN names ON a = b", "FULL"),
            ("OUTER JOIN names ON a = b", "OUTER"),
            ("CROSS JOIN names", "CROSS"),
            ("natural join names", "NATURAL"),
        ] {
            assert_eq!(
                JoinClause::parse(clause),
                Err(JoinParseError::NotInner(kind.into())),
                "{clause}"
            );
        }
    }

    #[test]
    fn join_malformed() {
        assert_eq!(
            JoinClause::parse("names ON a = b"),
            Err(JoinParseError::MissingJoin("names ON a = b".into()))
        );
        assert_eq!(
            JoinClause::parse("INNER names ON a = b"),
            Err(JoinParseError::MissingJoin("INNER names ON a = b".into()))
        );
        assert_eq!(JoinClause::parse("JOIN"), Err(JoinParseError::MissingTable));
        assert_eq!(
            JoinClause::parse("JOIN ON a = b"),
            Err(JoinParseError::MissingTable)
        );
        assert_eq!(
            JoinClause::parse("JOIN names"),
            Err(JoinParseError::MissingOn("names".into()))
        );
        assert_eq!(
            JoinClause::parse("JOIN names USING (id)"),
            Err(JoinParseError::MissingOn("names USING".into()))
        );
        assert_eq!(
            JoinClause::parse("JOIN names n ON   "),
            Err(JoinParseError::MissingCondition("names n".into()))
        );
        assert_eq!(
            JoinParseError::MissingOn("names".into()).to_string(),
            "The join on names has no ON clause"
        );
    }
}
