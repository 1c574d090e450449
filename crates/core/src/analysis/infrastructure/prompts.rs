use crate::analysis::domain::response_dialect::ResponseDialect;

const LEGACY_SYSTEM_PROMPT: &str = "Transkripte edilmiş metni doğru metinle karşılaştır ve hataları şu düzende raporla:

1. Metni yeniden yaz ve hatalı kelimeleri {süslü parantez} içine al.
2. 'Açıklama:' satırından sonra her hata için neden hatalı olduğunu tek cümleyle numaralandırarak yaz.
3. 'Hatalar:' satırından sonra hata türlerini ve sayılarını ver:
   - addition_errors: ekleme hatası sayısı
   - omission_errors: eksik okuma hatası sayısı
   - reversal_errors: ters çevirme hatası sayısı
   - repetition_errors: tekrar hatası sayısı
4. 'Okuma Hızı:' satırından sonra dakika başına kelime hızını 'reading_speed: x.xx' biçiminde ver.

Örnek:
bugün {okula} erken gittim ve {kitabımı} {kitabımı} unuttum.
Açıklama:
1. 'okula' kelimesi doğru metinde yok.
2. 'kitabımı' kelimesi iki kez okunmuş.
Hatalar:
addition_errors: 1
omission_errors: 0
reversal_errors: 0
repetition_errors: 1
Okuma Hızı:
reading_speed: 72.40
";

const EXTENDED_SYSTEM_PROMPT: &str = "Transkripte edilmiş metni doğru metinle karşılaştır ve hataları şu düzende raporla:

1. 'Metin:' satırından sonra metni yeniden yaz ve hatalı kelimeleri {süslü parantez} içine al.
2. 'Açıklama:' satırından sonra her hata için neden hatalı olduğunu tek cümleyle numaralandırarak yaz.
3. 'Hatalar:' satırından sonra hata türlerini ve sayılarını ver:
   - addition_errors: ekleme hatası sayısı
   - omission_errors: eksik okuma hatası sayısı
   - reversal_errors: ters çevirme hatası sayısı
   - repetition_errors: tekrar hatası sayısı
   - other_errors: diğer hataların sayısı

Örnek:
Metin:
bugün {okula} erken gittim ve {kitabımı} {kitabımı} unuttum.
Açıklama:
1. 'okula' kelimesi doğru metinde yok.
2. 'kitabımı' kelimesi iki kez okunmuş.
Hatalar:
addition_errors: 1
omission_errors: 0
reversal_errors: 0
repetition_errors: 1
other_errors: 0
";

pub fn system_prompt(dialect: ResponseDialect) -> &'static str {
    match dialect {
        ResponseDialect::Legacy => LEGACY_SYSTEM_PROMPT,
        ResponseDialect::Extended => EXTENDED_SYSTEM_PROMPT,
    }
}

pub fn user_message(reference_text: &str, transcript: &str) -> String {
    format!("Doğru metin: {reference_text} Transkripte edilmiş metin: {transcript}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::domain::error_taxonomy::ErrorCategory;
    use crate::analysis::domain::response_dialect::{
        ERRORS_MARKER, EXPLANATION_MARKER, READING_SPEED_MARKER, TEXT_MARKER,
    };

    #[test]
    fn test_every_prompt_asks_for_its_dialect_categories() {
        for dialect in ResponseDialect::ALL {
            let prompt = system_prompt(*dialect);
            for category in dialect.categories() {
                assert!(
                    prompt.contains(category.key()),
                    "{dialect} prompt lacks {}",
                    category.key()
                );
            }
            assert!(prompt.contains(EXPLANATION_MARKER));
            assert!(prompt.contains(ERRORS_MARKER));
        }
    }

    #[test]
    fn test_legacy_prompt_example_is_detected_as_legacy() {
        let prompt = system_prompt(ResponseDialect::Legacy);
        assert!(!prompt.contains(TEXT_MARKER));
        assert!(prompt.contains(READING_SPEED_MARKER));
        assert!(!prompt.contains(ErrorCategory::Other.key()));
    }

    #[test]
    fn test_extended_prompt_uses_text_marker() {
        let prompt = system_prompt(ResponseDialect::Extended);
        assert_eq!(ResponseDialect::detect(prompt), ResponseDialect::Extended);
    }

    #[test]
    fn test_user_message_layout() {
        assert_eq!(
            user_message("bir iki", "bir üç"),
            "Doğru metin: bir iki Transkripte edilmiş metin: bir üç"
        );
    }
}
