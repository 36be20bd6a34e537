//! User-facing prompt and notice texts.

pub const RESULTS_HEADER: &str = "Результаты поиска: ";
pub const CONTENTS_HEADER: &str = "Содержание статьи: ";
pub const EMPTY_ARTICLE: &str = "Статья пустая";
pub const ARTICLE_NOT_FOUND: &str = "Такой статьи не существует";
pub const NO_CONTENT_PLACEHOLDER: &str = "(нет содержимого)";
pub const FAREWELL: &str = "Завершаю работу...";

pub const QUERY_PROMPT: &str = "Введите запрос на поиск в Википедии: ";
pub const ARTICLE_PROMPT: &str = "Введите номер интересующей Вас статьи: ";
pub const VIEW_MODE_PROMPT: &str = "Хотите вывести аннотацию (summary), содержание (content) или полный текст статьи (full)? (S/C/F): ";
pub const SECTION_PROMPT: &str = "Введите номер интересующего блока статьи: ";
pub const STAY_PROMPT: &str = "Хотите остаться на этой статье или перейти к следующей? (Y/N): ";
pub const CONTINUE_PROMPT: &str = "Хотите продолжить? (Y/N) : ";

pub fn no_results(query: &str) -> String {
    format!("Результаты по запросу {query} не найдены. Повторите попытку")
}

pub fn no_such_article(answer: &str) -> String {
    format!("Статьи с номером {answer} нет в результатах поиска. Повторите попытку")
}

pub fn no_such_section(answer: &str) -> String {
    format!("Блока с номером {answer} нет для данной статьи. Повторите попытку")
}

pub fn unknown_answer(answer: &str, expected: &str) -> String {
    format!("Ответа «{answer}» нет среди вариантов [{expected}]. Повторите попытку")
}

/// One numbered line of a listing, e.g. `2 -- Behavior`.
pub fn numbered(position: usize, title: &str) -> String {
    format!("{position} -- {title}")
}
