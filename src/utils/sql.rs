/// 转义 LIKE 模式中的通配符
///
/// SeaORM 的 `contains` 会在两侧拼接 `%`，用户输入中的 `%`、`_` 与 `\` 需要先转义。
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
