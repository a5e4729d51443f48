use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Strips diacritics (NFKD decomposition), lowercases, trims and collapses
/// internal whitespace. Mixed Portuguese/English status vocabularies and
/// location names compare through this.
pub fn normalize(input: &str) -> String {
    input
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalization for status tokens: on top of [`normalize`], unifies spaces
/// and dashes into underscores so "Aprovação Pendente" and
/// "aprovacao_pendente" land on the same key.
pub fn normalize_token(input: &str) -> String {
    normalize(input)
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Case- and accent-insensitive equality.
pub fn eq_normalized(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_case() {
        assert_eq!(normalize("São Paulo"), "sao paulo");
        assert_eq!(normalize("  Validação   TJ "), "validacao tj");
        assert_eq!(normalize("CONGELADA"), "congelada");
    }

    #[test]
    fn token_form_unifies_separators() {
        assert_eq!(normalize_token("Aprovação Pendente"), "aprovacao_pendente");
        assert_eq!(normalize_token("aprovacao-pendente"), "aprovacao_pendente");
        assert_eq!(normalize_token("pending_approval"), "pending_approval");
    }

    #[test]
    fn normalized_equality() {
        assert!(eq_normalized("Banco de Talentos", "banco de talentos"));
        assert!(eq_normalized("Brasília", "BRASILIA"));
        assert!(!eq_normalized("ativa", "concluida"));
    }
}
