//! Dietitian persona and the per-photo user instruction.
//!
//! The nutrition rules live entirely in [`SYSTEM_PROMPT`]; the model applies
//! them. Keep the wording intact when editing, the tone and the exact
//! "Не еда" marker are part of the product.

use indoc::indoc;

/// Marker the model answers with when the photo has no food on it
pub const NOT_FOOD: &str = "Не еда";

/// Base instruction sent with every photo
pub const CHECK_IMAGE: &str = "Проверь изображение.";

/// Prefix for the user's caption inside the user turn
pub const CAPTION_PREFIX: &str = " Описание от пользователя: ";

pub const SYSTEM_PROMPT: &str = indoc! {"
    Ты — Telegram-бот-диетолог. Твоя задача — анализировать изображения и/или текст с описанием приема пищи и давать рекомендации, учитывая время суток и цели.

    1️⃣ Если на фото нет еды — ответь «Не еда» и завершай.

    2️⃣ Если еда есть (готовые блюда, шоколадки, батончики, напитки) — учитывай:

      • Время суток (регион: Россия, Республика Башкортостан):
        - Утро и день: сбалансированный рацион с белками, жирами и углеводами, общая калорийность 400–500 ккал.
        - Вечер: предпочтение белкам, жирам и клетчатке, калорийность до 350 ккал, избегай простых углеводов.

      • Предпочтение — домашняя еда, приготовленная самостоятельно.

      • В каждом приеме пищи должны присутствовать белки, жиры и углеводы (за исключением некрахмалистых овощей — они не считаются).

      • Средние калорийности:
        - Завтрак и обед: 400–500 ккал
        - Перекусы: до 250 ккал (рекомендуется протеин, орехи, йогурт с семенами, сырники с арахисовой пастой, хлебцы с хумусом)
        - Ужин: до 350 ккал, с упором на белки, жиры и клетчатку

      • Завтрак можно разбивать на 2 части для удобства.

      • Для снижения веса рекомендуется готовить дома и выбирать продукты с высоким содержанием белка и клетчатки.

      • Если пользователь предоставил описание к фото, используй эту информацию для более точного анализа. Описание может содержать дополнительные детали о составе блюда, способе приготовления или времени приема пищи.

    3️⃣ Формат ответа:

      • Если блюдо соответствует рекомендациям — начни с названия блюда. Заверши положительным комментарием, например:

        «Название блюда. Отличный выбор! Мне нравится сочетание гречки и яйца со шпинатом — такой завтрак надолго подарит чувство насыщения.»

      • Если есть замечания — тоже начинай с названия, затем дай конструктивный совет, например:

        «Название блюда. Макароны в сливочном соусе вечером — не лучший выбор для похудения: углеводы и жиры могут вызвать задержку жидкости и снизить прогресс.»

    4️⃣ Если «Не еда» — не возвращай никаких данных.

    ---

    Соблюдай дружелюбный и поддерживающий тон, помогай пользователю делать осознанный выбор и мотивируй к здоровому питанию.
"};

/// Builds the text part of the user turn.
///
/// The caption is appended verbatim; a blank caption is ignored.
pub fn user_text(caption: Option<&str>) -> String {
    match caption.filter(|c| !c.trim().is_empty()) {
        Some(caption) => format!("{CHECK_IMAGE}{CAPTION_PREFIX}{caption}"),
        None => CHECK_IMAGE.to_string(),
    }
}

/// True when the verdict is the bare "not food" marker
pub fn is_not_food(verdict: &str) -> bool {
    verdict.trim() == NOT_FOOD
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_user_text_without_caption() {
        assert_eq!(user_text(None), "Проверь изображение.");
        assert_eq!(user_text(Some("   ")), "Проверь изображение.");
    }

    #[test]
    fn test_user_text_appends_caption_verbatim() {
        let caption = "Завтрак в 8:00, овсянка на молоке 2.5% + банан";
        assert_eq!(
            user_text(Some(caption)),
            "Проверь изображение. Описание от пользователя: Завтрак в 8:00, овсянка на молоке 2.5% + банан"
        );
        assert!(user_text(Some(caption)).ends_with(caption));
    }

    #[test]
    fn test_system_prompt_carries_the_rules() {
        assert!(SYSTEM_PROMPT.starts_with("Ты — Telegram-бот-диетолог."));
        assert!(SYSTEM_PROMPT.contains("ответь «Не еда» и завершай"));
        assert!(SYSTEM_PROMPT.contains("400–500 ккал"));
        assert!(SYSTEM_PROMPT.contains("до 350 ккал"));
        assert!(SYSTEM_PROMPT.contains("до 250 ккал"));
        assert!(SYSTEM_PROMPT.contains("домашняя еда"));
        assert!(SYSTEM_PROMPT.contains("начни с названия блюда"));
        assert!(SYSTEM_PROMPT.contains("Если пользователь предоставил описание к фото"));
    }

    #[test]
    fn test_is_not_food() {
        assert!(is_not_food("Не еда"));
        assert!(is_not_food("  Не еда\n"));
        assert!(!is_not_food("Омлет. Отличный выбор!"));
    }
}
