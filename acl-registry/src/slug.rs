//! Slug derivation for names without an explicit slug

/// Turn a display name into a URL-friendly slug.
///
/// ASCII letters and digits are kept (lowercased), common accented Latin
/// letters are folded to their base letter, every other run of characters
/// becomes a single `-`, and leading or trailing dashes are dropped.
///
/// # Examples
///
/// ```
/// use acl_registry::slug::slugify;
///
/// assert_eq!(slugify("Panel Admin"), "panel-admin");
/// assert_eq!(slugify("  Module: Users & Groups "), "module-users-groups");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars().flat_map(char::to_lowercase).map(fold_latin) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

fn fold_latin(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_names() {
        assert_eq!(slugify("Users"), "users");
        assert_eq!(slugify("Create"), "create");
        assert_eq!(slugify("module-support"), "module-support");
    }

    #[test]
    fn test_collapses_separators() {
        assert_eq!(slugify("Panel   Admin"), "panel-admin");
        assert_eq!(slugify("a--b__c"), "a-b-c");
        assert_eq!(slugify("--edge--"), "edge");
    }

    #[test]
    fn test_accents_are_folded() {
        assert_eq!(slugify("Relatório Anual"), "relatorio-anual");
        assert_eq!(slugify("Ação"), "acao");
    }

    #[test]
    fn test_other_characters_are_separators() {
        assert_eq!(slugify("users→create"), "users-create");
        assert_eq!(slugify("日本"), "");
    }
}
