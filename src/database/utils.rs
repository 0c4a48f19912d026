use regex::Regex;

/// Collapses whitespace and rewrites `?` placeholders into Postgres `$n`
/// form, so queries can be written in the readable `?` style.
pub fn sql(query: &str) -> String {
    let collapsed = query.split_whitespace().collect::<Vec<&str>>().join(" ");
    let placeholder = Regex::new(r"\?").unwrap();

    let mut result = collapsed;
    let mut param_index = 1;
    while let Some(found) = placeholder.find(&result) {
        result.replace_range(found.range(), &format!("${}", param_index));
        param_index += 1;
    }
    result
}
