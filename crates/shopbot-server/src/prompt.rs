//! System prompt assembly for the completion call.

const PRODUCTS_BEGIN: &str = "=== AKTUELLE PRODUKTINFORMATIONEN ===";
const PRODUCTS_END: &str = "=== ENDE PRODUKTINFORMATIONEN ===";

/// Builds the system prompt around a rendered product summary.
///
/// The product block sits between fixed markers so the model can tell
/// catalog data apart from instructions.
pub fn build_system_prompt(
    shop_name: &str,
    summary: &str,
    product_count: usize,
    intent_detected: bool,
) -> String {
    let count_note = match (product_count, intent_detected) {
        (0, _) => String::new(),
        (n, true) => format!("({n} Produkte geladen basierend auf der Suchanfrage)"),
        (n, false) => format!("({n} Produkte geladen)"),
    };

    format!(
        "Du bist ein freundlicher First-Layer-Support-Bot für {shop_name}.\n\
         Beantworte Fragen zu Produkten, Wirkstoffen, Versand und Zahlung. \
         Empfiehl nur Produkte aus den Produktinformationen unten und bevorzuge \
         die zuerst gelisteten.\n\
         Antworte kurz und freundlich. Antworte auf Deutsch, es sei denn, der \
         Kunde schreibt in einer anderen Sprache.\n\
         \n\
         {PRODUCTS_BEGIN}\n\
         {summary}\n\
         \n\
         {count_note}\n\
         {PRODUCTS_END}\n\
         \n\
         Produktempfehlungen:\n\
         - Nenne immer den direkten Produktlink, wenn einer vorhanden ist.\n\
         - Zeige Preis und Verfügbarkeit, wenn bekannt.\n\
         - Erfinde keine Produkte, Preise oder Links.\n\
         - Wenn nichts Passendes dabei ist, sag das ehrlich und frage nach Details."
    )
}
