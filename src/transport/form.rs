use crate::domain::RequestParams;

/// Flatten request params into form fields. Null values are skipped.
pub fn encode_form(params: &RequestParams) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(name, value)| value.render().map(|rendered| (name.to_owned(), rendered)))
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::domain::ParamValue;

    use super::*;

    #[test]
    fn encode_skips_nulls_and_renders_values() {
        let params = RequestParams::new()
            .with("idAddressBook", 12_i64)
            .with("name", "Clients")
            .with("description", ParamValue::Null)
            .with("idPhones", vec!["1".to_owned(), "2".to_owned()]);

        assert_eq!(
            encode_form(&params),
            vec![
                ("idAddressBook".to_owned(), "12".to_owned()),
                ("idPhones".to_owned(), r#"["1","2"]"#.to_owned()),
                ("name".to_owned(), "Clients".to_owned()),
            ]
        );
    }

    #[test]
    fn encode_empty_params() {
        assert!(encode_form(&RequestParams::new()).is_empty());
    }
}
