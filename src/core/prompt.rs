use crate::domain::model::{AdviceRequest, ChatMessage};

/// CTA 主旨在沒有 area 時使用的預設值
pub const DEFAULT_AREA: &str = "Diagnostika";

pub const CONTACT_EMAIL: &str = "info@outofthebox.cz";

/// 固定的系統指令：顧問角色、輸出格式、內容限制
pub fn system_prompt() -> String {
    format!(
        "Jsi seniorní konzultant společnosti Out of the Box, která pomáhá rodinným a privátním (zejm. výrobním) firmám.
Odpovídej česky, konkrétně a akčně v bodech (max 6 kroků), zaměř se na kroky nasaditelné do 30–60 dní.
Zohledňuj: vztah vlastník–management, firemní kulturu, komunikaci a důvěru, plánování, kapacitní úzká hrdla, leadership.
Nevyžaduj osobní údaje, nedávej právní/účetní rady, neměň téma dotazu.
Výstup vrať jako čisté HTML pro vložení do webu:
<h4>…</h4>
<ul><li>…</li></ul>
<div class=\"oobpa-cta\">…</div>
V závěru vždy přidej CTA blok s e-mailem {CONTACT_EMAIL} a předmětem podle oblasti problému."
    )
}

/// 把請求欄位代入使用者指令；description 已截斷
pub fn user_prompt(request: &AdviceRequest, description: &str) -> String {
    let area = request.area.as_deref().unwrap_or_default();
    let urgency = request.urgency.as_deref().unwrap_or_default();
    let size = request.size.as_deref().unwrap_or_default();
    let subject_area = request
        .area
        .as_deref()
        .filter(|a| !a.is_empty())
        .unwrap_or(DEFAULT_AREA);

    format!(
        "KONTEKST:
- Oblast: {area}
- Urgence: {urgency}
- Velikost firmy: {size}
- Popis problému (anonymně, bez PII): {description}

ÚKOL:
1) Pojmenuj v <h4> hlavní jádro problému.
2) Přidej 4–6 praktických kroků (<li>…</li>) pro diagnostiku → pilot → stabilizaci.
3) Pokud dává smysl, zohledni plán vs. skutečnost, kapacitu a úzká hrdla.
4) Zakonči CTA blokem „Domluvit konzultaci“ (mailto: {CONTACT_EMAIL}; předmět = „Konzultace – {subject_area}“)."
    )
}

pub fn build_messages(request: &AdviceRequest, description: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt()),
        ChatMessage::user(user_prompt(request, description)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_constrains_output_format() {
        let prompt = system_prompt();
        assert!(prompt.contains("<h4>"));
        assert!(prompt.contains("<ul><li>"));
        assert!(prompt.contains("oobpa-cta"));
        assert!(prompt.contains("Nevyžaduj osobní údaje"));
        assert!(prompt.contains(CONTACT_EMAIL));
    }

    #[test]
    fn test_user_prompt_interpolates_fields() {
        let request = AdviceRequest {
            area: Some("Plánování".to_string()),
            urgency: Some("vysoká".to_string()),
            size: Some("50-250".to_string()),
            description: None,
        };

        let prompt = user_prompt(&request, "Zpožděné zakázky");
        assert!(prompt.contains("- Oblast: Plánování"));
        assert!(prompt.contains("- Urgence: vysoká"));
        assert!(prompt.contains("- Velikost firmy: 50-250"));
        assert!(prompt.contains("Zpožděné zakázky"));
        assert!(prompt.contains("Konzultace – Plánování"));
    }

    #[test]
    fn test_user_prompt_defaults_subject_area() {
        let prompt = user_prompt(&AdviceRequest::default(), "");
        assert!(prompt.contains("Konzultace – Diagnostika"));
        assert!(!prompt.contains("undefined"));
    }

    #[test]
    fn test_build_messages_roles() {
        let messages = build_messages(&AdviceRequest::default(), "");
        let roles: Vec<&str> = messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user"]);
    }
}
