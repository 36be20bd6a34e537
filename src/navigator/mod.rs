//! The interactive search → select → view loop.
//!
//! One [`Navigator`] owns a [`Session`] and drives the whole conversation:
//!
//! 1. search with the session query; an empty result is reported and the same
//!    search is issued again
//! 2. ask for a 1-based article number (out-of-range or non-numeric answers
//!    are reported and asked again)
//! 3. ask for a view mode: `S`ummary, `C`ontent or `F`ull
//! 4. in Content mode, list the sections and let the user read them one by one
//!    until they choose to move on
//! 5. ask whether to continue; `Y` starts over at step 1, `N` ends the session
//!
//! Letter menus follow the [`MenuPolicy`]: under `Strict` an unrecognised
//! answer ends the session with [`NavigatorError::InvalidMenuAnswer`], under
//! `Lenient` it is reported and asked again.

pub mod messages;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::{ArticleRequest, SearchQuery, SearchResults, SectionMap, ViewMode};
use crate::sources::{ContentProvider, ProviderError};
use crate::ui::Console;

/// How unrecognised letter-menu answers are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuPolicy {
    /// Abort the session
    #[default]
    Strict,
    /// Report and ask again
    Lenient,
}

/// Errors that end a navigation session
#[derive(Debug, thiserror::Error)]
pub enum NavigatorError {
    /// A letter menu got an answer outside its options
    #[error("{answer:?} doesn't exist in [{expected}]")]
    InvalidMenuAnswer {
        answer: String,
        expected: &'static str,
    },

    /// The provider does not serve the requested language
    #[error("language {0:?} is not supported by the content provider")]
    UnsupportedLanguage(String),

    /// Input ended while a prompt was waiting
    #[error("input closed while waiting for an answer")]
    InputClosed,

    /// Console I/O error
    #[error("console I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Content provider failure that cannot be reported and skipped
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Settings for one interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub query: String,
    pub max_results: usize,
    pub language: String,
}

impl Session {
    /// Build a session without checking the language against a provider.
    pub fn new(query: impl Into<String>, max_results: usize, language: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results,
            language: language.into(),
        }
    }

    /// Build a session after confirming the provider serves `language`.
    pub async fn establish<P: ContentProvider + ?Sized>(
        provider: &P,
        query: impl Into<String>,
        max_results: usize,
        language: impl Into<String>,
    ) -> Result<Self, NavigatorError> {
        let language = language.into();
        if !provider.is_supported_language(&language).await? {
            return Err(NavigatorError::UnsupportedLanguage(language));
        }
        debug!(%language, provider = provider.id(), "Language accepted");
        Ok(Self::new(query, max_results, language))
    }

    fn search_query(&self) -> SearchQuery {
        SearchQuery::new(&self.query)
            .max_results(self.max_results)
            .language(&self.language)
    }
}

/// Ask for a search query until a non-blank one is given.
pub fn prompt_query(console: &mut impl Console) -> Result<String, NavigatorError> {
    loop {
        let answer = console
            .ask(messages::QUERY_PROMPT)?
            .ok_or(NavigatorError::InputClosed)?;
        let query = answer.trim();
        if !query.is_empty() {
            return Ok(query.to_string());
        }
    }
}

const YES_NO: &str = "Y, N";
const VIEW_MODES: &str = "S, C, F";

fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" => Some(true),
        "n" => Some(false),
        _ => None,
    }
}

/// Drives one interactive session against a content provider.
pub struct Navigator<'a, P: ContentProvider + ?Sized, C: Console> {
    provider: &'a P,
    console: C,
    session: Session,
    policy: MenuPolicy,
}

impl<'a, P: ContentProvider + ?Sized, C: Console> Navigator<'a, P, C> {
    pub fn new(provider: &'a P, console: C, session: Session) -> Self {
        Self {
            provider,
            console,
            session,
            policy: MenuPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: MenuPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Run until the user chooses to stop or a fatal error occurs.
    pub async fn run(&mut self) -> Result<(), NavigatorError> {
        info!(
            query = %self.session.query,
            language = %self.session.language,
            max_results = self.session.max_results,
            provider = self.provider.id(),
            "Starting navigation"
        );

        loop {
            let results = self.search_until_found().await?;
            let position =
                self.choose_position(messages::ARTICLE_PROMPT, results.len(), messages::no_such_article)?;
            let title = results.get(position).unwrap_or_default().to_string();
            let article = ArticleRequest::new(title, &self.session.language);
            debug!(title = %article.title, "Article selected");

            let mode = self.ask_menu(messages::VIEW_MODE_PROMPT, VIEW_MODES, ViewMode::from_letter)?;
            debug!(%mode, "View mode selected");

            match mode {
                ViewMode::Summary => {
                    let summary = self.fetch(&article, ViewMode::Summary).await;
                    self.show_text(summary.as_deref());
                }
                ViewMode::Content => self.browse_sections(&article).await?,
                ViewMode::Full => {
                    let text = self.fetch(&article, ViewMode::Full).await;
                    self.show_text(text.as_deref());
                }
            }

            if !self.ask_menu(messages::CONTINUE_PROMPT, YES_NO, parse_yes_no)? {
                self.console.say("");
                self.console.say(messages::FAREWELL);
                info!("Navigation finished");
                return Ok(());
            }
        }
    }

    /// Search with the session settings, repeating while nothing is found.
    async fn search_until_found(&mut self) -> Result<SearchResults, NavigatorError> {
        let query = self.session.search_query();
        loop {
            let results = match self.provider.search(&query).await {
                Ok(results) => results,
                Err(e) if e.is_not_found() => SearchResults::empty(&query.query),
                Err(e) => return Err(e.into()),
            };

            if results.is_empty() {
                warn!(query = %query.query, "Search returned no results, searching again");
                self.console.notice(&messages::no_results(&query.query));
                continue;
            }

            self.console.say(messages::RESULTS_HEADER);
            for (position, title) in results.numbered() {
                self.console.say(&messages::numbered(position, title));
            }
            return Ok(results);
        }
    }

    /// Show the table of contents and print sections until the user moves on.
    async fn browse_sections(&mut self, article: &ArticleRequest) -> Result<(), NavigatorError> {
        let text = self.fetch(article, ViewMode::Content).await;
        let sections = SectionMap::split(text.as_deref().unwrap_or_default());
        debug!(title = %article.title, sections = sections.len(), "Article split into sections");

        loop {
            self.show_contents(&sections);
            let position =
                self.choose_position(messages::SECTION_PROMPT, sections.len(), messages::no_such_section)?;

            self.console.say("");
            self.console
                .say(sections.display_body(position).unwrap_or_default());

            if !self.ask_menu(messages::STAY_PROMPT, YES_NO, parse_yes_no)? {
                return Ok(());
            }
        }
    }

    fn show_contents(&mut self, sections: &SectionMap) {
        if sections.is_empty() {
            self.console.say(messages::EMPTY_ARTICLE);
            return;
        }
        self.console.say(messages::CONTENTS_HEADER);
        self.console.say("");
        for (i, title) in sections.titles().enumerate() {
            self.console.say(&messages::numbered(i + 1, title));
        }
    }

    fn show_text(&mut self, text: Option<&str>) {
        self.console.say("");
        self.console
            .say(text.unwrap_or(messages::NO_CONTENT_PLACEHOLDER));
    }

    /// Fetch article text for a view mode; failures are reported, not raised.
    async fn fetch(&mut self, article: &ArticleRequest, mode: ViewMode) -> Option<String> {
        let result = match mode {
            ViewMode::Summary => self.provider.fetch_summary(article).await,
            ViewMode::Content | ViewMode::Full => self.provider.fetch_full_text(article).await,
        };

        match result {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(title = %article.title, error = %e, "Article fetch failed");
                self.console.notice(messages::ARTICLE_NOT_FOUND);
                None
            }
        }
    }

    fn ask_line(&mut self, prompt: &str) -> Result<String, NavigatorError> {
        self.console
            .ask(prompt)?
            .ok_or(NavigatorError::InputClosed)
    }

    /// Ask for a 1-based position in `1..=count`, repeating on bad answers.
    fn choose_position(
        &mut self,
        prompt: &str,
        count: usize,
        reject: fn(&str) -> String,
    ) -> Result<usize, NavigatorError> {
        loop {
            let answer = self.ask_line(prompt)?;
            let answer = answer.trim();
            match answer.parse::<usize>() {
                Ok(position) if (1..=count).contains(&position) => return Ok(position),
                _ => {
                    debug!(answer, count, "Rejected position");
                    self.console.notice(&reject(answer));
                }
            }
        }
    }

    /// Ask a letter menu question and apply the menu policy to bad answers.
    fn ask_menu<T>(
        &mut self,
        prompt: &str,
        expected: &'static str,
        parse: fn(&str) -> Option<T>,
    ) -> Result<T, NavigatorError> {
        loop {
            let answer = self.ask_line(prompt)?;
            if let Some(choice) = parse(&answer) {
                return Ok(choice);
            }

            match self.policy {
                MenuPolicy::Strict => {
                    return Err(NavigatorError::InvalidMenuAnswer { answer, expected });
                }
                MenuPolicy::Lenient => {
                    self.console
                        .notice(&messages::unknown_answer(answer.trim(), expected));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::MockSource;
    use crate::ui::ScriptedConsole;

    fn cats() -> MockSource {
        MockSource::new()
            .with_titles(["Cat", "Cat (disambiguation)", "Catfish"])
            .with_summary("Cat", "The cat is a small carnivore.")
            .with_full_text(
                "Cat",
                "Intro text. == Behavior == Cats sleep a lot. == Diet == Cats eat meat.",
            )
    }

    async fn run_script(
        source: &MockSource,
        answers: &[&str],
        policy: MenuPolicy,
    ) -> (Result<(), NavigatorError>, ScriptedConsole) {
        let mut console = ScriptedConsole::new(answers.iter().copied());
        let result = Navigator::new(source, &mut console, Session::new("Cat", 3, "en"))
            .with_policy(policy)
            .run()
            .await;
        (result, console)
    }

    #[test]
    fn test_yes_no_parsing() {
        assert_eq!(parse_yes_no("Y"), Some(true));
        assert_eq!(parse_yes_no("n"), Some(false));
        assert_eq!(parse_yes_no("yes"), None);
    }

    #[tokio::test]
    async fn test_summary_then_exit() {
        let source = cats();
        let (result, console) = run_script(&source, &["1", "s", "n"], MenuPolicy::Strict).await;

        assert!(result.is_ok());
        let printed = console.printed();
        assert!(printed.contains(&"The cat is a small carnivore."));
        assert_eq!(printed.last(), Some(&messages::FAREWELL));
        assert_eq!(source.search_calls(), 1);
    }

    #[tokio::test]
    async fn test_full_text_is_printed_verbatim() {
        let source = cats();
        let (result, console) = run_script(&source, &["1", "F", "n"], MenuPolicy::Strict).await;

        assert!(result.is_ok());
        assert!(console
            .printed()
            .contains(&"Intro text. == Behavior == Cats sleep a lot. == Diet == Cats eat meat."));
    }

    #[tokio::test]
    async fn test_missing_article_prints_placeholder() {
        let source = cats();
        let (result, console) = run_script(&source, &["3", "s", "n"], MenuPolicy::Strict).await;

        assert!(result.is_ok());
        assert_eq!(console.notices(), vec![messages::ARTICLE_NOT_FOUND]);
        assert!(console.printed().contains(&messages::NO_CONTENT_PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_missing_article_in_content_mode_lists_empty_lead() {
        let source = cats();
        let (result, console) =
            run_script(&source, &["2", "c", "1", "n", "n"], MenuPolicy::Strict).await;

        assert!(result.is_ok());
        assert!(console.printed().contains(&"1 -- Аннотация"));
        assert!(!console.printed().contains(&"2 -- Behavior"));
    }

    #[tokio::test]
    async fn test_out_of_range_article_is_asked_again() {
        let source = cats();
        let (result, console) =
            run_script(&source, &["0", "4", "abc", "2", "s", "n"], MenuPolicy::Strict).await;

        assert!(result.is_ok());
        assert_eq!(
            console.notices(),
            vec![
                messages::no_such_article("0"),
                messages::no_such_article("4"),
                messages::no_such_article("abc"),
                messages::ARTICLE_NOT_FOUND.to_string(),
            ]
        );
        assert_eq!(source.search_calls(), 1);
    }

    #[tokio::test]
    async fn test_strict_policy_aborts_on_unknown_view_mode() {
        let source = cats();
        let (result, console) = run_script(&source, &["1", "x", "n"], MenuPolicy::Strict).await;

        match result {
            Err(NavigatorError::InvalidMenuAnswer { answer, expected }) => {
                assert_eq!(answer, "x");
                assert_eq!(expected, VIEW_MODES);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(console.remaining_answers(), 1);
        assert_eq!(source.fetch_calls(), 0);
    }

    #[tokio::test]
    async fn test_lenient_policy_asks_again() {
        let source = cats();
        let (result, console) =
            run_script(&source, &["1", "x", "s", "maybe", "n"], MenuPolicy::Lenient).await;

        assert!(result.is_ok());
        assert_eq!(
            console.notices(),
            vec![
                messages::unknown_answer("x", VIEW_MODES),
                messages::unknown_answer("maybe", YES_NO),
            ]
        );
    }

    #[tokio::test]
    async fn test_strict_policy_aborts_on_unknown_continue_answer() {
        let source = cats();
        let (result, _) = run_script(&source, &["1", "s", "q"], MenuPolicy::Strict).await;
        assert!(matches!(
            result,
            Err(NavigatorError::InvalidMenuAnswer { expected: YES_NO, .. })
        ));
    }

    #[tokio::test]
    async fn test_continue_runs_a_fresh_search() {
        let source = cats();
        let (result, _) =
            run_script(&source, &["1", "s", "y", "2", "s", "n"], MenuPolicy::Strict).await;

        assert!(result.is_ok());
        assert_eq!(source.search_calls(), 2);
        assert_eq!(source.fetch_calls(), 2);
    }

    #[tokio::test]
    async fn test_closed_input_is_fatal() {
        let source = cats();
        let (result, _) = run_script(&source, &["1"], MenuPolicy::Lenient).await;
        assert!(matches!(result, Err(NavigatorError::InputClosed)));
    }

    #[test]
    fn test_prompt_query_skips_blank_answers() {
        let mut console = ScriptedConsole::new(["", "   ", " Cat "]);
        assert_eq!(prompt_query(&mut console).unwrap(), "Cat");
        assert_eq!(console.prompts().len(), 3);

        let mut closed = ScriptedConsole::default();
        assert!(matches!(
            prompt_query(&mut closed),
            Err(NavigatorError::InputClosed)
        ));
    }

    #[tokio::test]
    async fn test_establish_rejects_unknown_language() {
        let source = MockSource::new().with_languages(["en", "ru"]);

        let session = Session::establish(&source, "Cat", 3, "ru").await.unwrap();
        assert_eq!(session.language, "ru");

        let err = Session::establish(&source, "Cat", 3, "xx").await.unwrap_err();
        assert!(matches!(err, NavigatorError::UnsupportedLanguage(code) if code == "xx"));
    }

    #[tokio::test]
    async fn test_search_uses_session_settings() {
        let source = cats();
        let mut console = ScriptedConsole::new(["1", "s", "n"]);
        Navigator::new(&source, &mut console, Session::new("Cat", 2, "en"))
            .run()
            .await
            .unwrap();

        let query = source.last_query().unwrap();
        assert_eq!(query, SearchQuery::new("Cat").max_results(2).language("en"));
        assert!(!console.printed().contains(&"3 -- Catfish"));
    }
}
