use std::collections::HashSet;

/// 主题字符串的一级分隔符，按单字符切分
const PRIMARY_DELIMITERS: &[char] = &[',', '/', '|', '>', '-', ':'];

/// 二级分隔符，把复合主题短语继续拆成独立分类名
const SECONDARY_DELIMITERS: &[&str] = &[" and ", "&", " + ", ";", "\n"];

/// 从自由文本主题中提取规范化的分类名候选。
///
/// 规则：
/// - 空白主题返回空列表
/// - 先按 [`PRIMARY_DELIMITERS`] 切分，再按 [`SECONDARY_DELIMITERS`] 拆分复合短语
/// - 片段去除首尾空白，丢弃空片段
/// - 每个片段先转小写再按词首字母大写，得到统一展示形式
/// - 忽略大小写去重，保留首次出现的顺序
/// - 如果没有任何片段存活，把整个主题作为单个分类名返回
///
/// 纯函数，相同输入总是产生相同输出。
pub fn extract_category_names(topic: &str) -> Vec<String> {
    let normalized = topic.trim();
    if normalized.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for fragment in normalized
        .split(PRIMARY_DELIMITERS)
        .flat_map(split_compound)
    {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            continue;
        }

        let name = title_case(fragment);
        if seen.insert(name.to_lowercase()) {
            names.push(name);
        }
    }

    if names.is_empty() {
        names.push(title_case(normalized));
    }

    names
}

/// 按二级分隔符依次拆分片段
fn split_compound(fragment: &str) -> Vec<&str> {
    let mut parts = vec![fragment];
    for delimiter in SECONDARY_DELIMITERS {
        parts = parts
            .into_iter()
            .flat_map(|part| part.split(*delimiter))
            .collect();
    }
    parts
}

/// 小写后把每个词的首字母大写
fn title_case(fragment: &str) -> String {
    fragment
        .split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_topic_yields_nothing() {
        assert!(extract_category_names("").is_empty());
        assert!(extract_category_names("   ").is_empty());
    }

    #[test]
    fn test_single_topic_falls_back_to_title_case() {
        assert_eq!(extract_category_names("sports"), vec!["Sports"]);
        assert_eq!(extract_category_names("WORLD NEWS"), vec!["World News"]);
    }

    #[test]
    fn test_dedup_preserves_first_seen_order() {
        assert_eq!(
            extract_category_names("Politics, Politics, World"),
            vec!["Politics", "World"]
        );
        assert_eq!(
            extract_category_names("politics, POLITICS"),
            vec!["Politics"]
        );
    }

    #[test]
    fn test_compound_separators() {
        assert_eq!(
            extract_category_names("Tech & Business/Finance"),
            vec!["Tech", "Business", "Finance"]
        );
        assert_eq!(
            extract_category_names("Politics/World News & Economy"),
            vec!["Politics", "World News", "Economy"]
        );
    }

    #[test]
    fn test_word_separators() {
        assert_eq!(
            extract_category_names("science and health; culture"),
            vec!["Science", "Health", "Culture"]
        );
    }

    #[test]
    fn test_mixed_delimiters_and_noise() {
        assert_eq!(
            extract_category_names(" Politics | economy > Markets : trade "),
            vec!["Politics", "Economy", "Markets", "Trade"]
        );
    }

    #[test]
    fn test_idempotent() {
        let first = extract_category_names("Tech & Business/Finance");
        let second = extract_category_names("Tech & Business/Finance");
        assert_eq!(first, second);
    }
}
