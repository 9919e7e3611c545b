//! HTML extraction for the gazette's search form, result lists and detail pages.
//!
//! The site's DOM (class names, element attributes) is a semi-stable external
//! contract. Extraction is tolerant wherever a single broken element must not
//! abort a batch: result items without a link are skipped silently and a
//! missing article container yields nothing. Missing *form* structure is the
//! one hard failure, since it means the whole search cannot be driven.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::config::detail_url;
use crate::error::{Result, ScraperError};
use crate::text::clean_text;
use crate::types::ResultEntry;

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static DOC_TYPE_SELECT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"select[name="dt"]"#).expect("valid selector"));

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static OPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("option").expect("valid selector"));

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static FORM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("form").expect("valid selector"));

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static START_DATE_INPUT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"input[name="pdd"]"#).expect("valid selector"));

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static END_DATE_INPUT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"input[name="pdf"]"#).expect("valid selector"));

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static RESULT_LIST: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.list").expect("valid selector"));

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static LIST_ITEM_CONTENT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.list-item--content").expect("valid selector"));

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static LIST_ITEM_BUTTON: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.list-item--button").expect("valid selector"));

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static LIST_ITEM_DATE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p.list-item--date").expect("valid selector"));

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector"));

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static NEXT_PAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.pagination-button.pagination-next").expect("valid selector"));

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static ARTICLE_MAIN: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("main.page__inner.page__inner--content.article-text").expect("valid selector")
});

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid selector"));

/// One `<option>` of the document-type select.
///
/// `label` is the trimmed option text; `value` is the `value` attribute,
/// falling back to the label when the attribute is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTypeOption {
    pub value: String,
    pub label: String,
}

/// Extract the document-type options from the search page.
///
/// # Returns
/// * `Err(ScraperError::MissingFormElement)` if the select is absent
pub fn document_type_options(html: &str) -> Result<Vec<DocTypeOption>> {
    let document = Html::parse_document(html);
    let select = document
        .select(&DOC_TYPE_SELECT)
        .next()
        .ok_or_else(|| ScraperError::MissingFormElement {
            element: "select[name=dt]".to_string(),
        })?;

    let options = select
        .select(&OPTION)
        .map(|opt| {
            let label = clean_text(&opt.text().collect::<String>());
            let value = opt
                .value()
                .attr("value")
                .map(str::to_string)
                .unwrap_or_else(|| label.clone());
            DocTypeOption { value, label }
        })
        .collect();

    Ok(options)
}

/// Verify the search form carries both date inputs.
///
/// # Returns
/// * `Err(ScraperError::MissingFormElement)` naming the first absent input
pub fn validate_date_inputs(html: &str) -> Result<()> {
    let document = Html::parse_document(html);
    if document.select(&START_DATE_INPUT).next().is_none() {
        return Err(ScraperError::MissingFormElement {
            element: "input[name=pdd]".to_string(),
        });
    }
    if document.select(&END_DATE_INPUT).next().is_none() {
        return Err(ScraperError::MissingFormElement {
            element: "input[name=pdf]".to_string(),
        });
    }
    Ok(())
}

/// Find the action of the form that contains the document-type select.
///
/// Returns `None` when the select sits outside any form or the form has no
/// `action` attribute; the caller then submits to the search page URL itself.
pub fn search_form_action(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&FORM)
        .find(|form| form.select(&DOC_TYPE_SELECT).next().is_some())
        .and_then(|form| form.value().attr("action"))
        .map(str::to_string)
}

/// Extract the result entries of one results page.
///
/// Within each `div.list`, content and button divs are paired positionally.
/// Items without an extractable link are dropped silently.
pub fn result_entries(html: &str, detail_base: &str) -> Vec<ResultEntry> {
    let document = Html::parse_document(html);
    let mut entries = Vec::new();

    for list in document.select(&RESULT_LIST) {
        let contents = list.select(&LIST_ITEM_CONTENT);
        let buttons = list.select(&LIST_ITEM_BUTTON);

        for (content, button) in contents.zip(buttons) {
            let Some(anchor) = content.select(&ANCHOR).next() else {
                continue;
            };
            // The a[href] selector guarantees the attribute is present
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };

            let pub_date = content
                .select(&LIST_ITEM_DATE)
                .next()
                .map(|date| date.text().collect::<String>())
                .unwrap_or_default();

            entries.push(ResultEntry {
                ref_number: clean_text(&button.text().collect::<String>()),
                pub_date,
                short_text: clean_text(&anchor.text().collect::<String>()),
                url: detail_url(detail_base, href),
            });
        }
    }

    entries
}

/// Find the next-page control's href, if pagination continues.
pub fn next_page_href(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&NEXT_PAGE)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}

/// Extract the document body from a detail page.
///
/// The body is the first paragraph inside the article container. `None`
/// when the container or paragraph is absent.
pub fn article_body(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let main = document.select(&ARTICLE_MAIN).next()?;
    let paragraph = main.select(&PARAGRAPH).next()?;
    Some(clean_text(&paragraph.text().collect::<String>()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SEARCH_PAGE: &str = r#"
<html><body>
  <form action="rech_res.pl" method="get">
    <select name="dt">
      <option value="">Alle</option>
      <option value="Koninklijk besluit"> Koninklijk besluit </option>
      <option>Ministerieel besluit</option>
    </select>
    <input name="pdd" type="text">
    <input name="pdf" type="text">
    <button>Zoeken</button>
  </form>
</body></html>"#;

    #[test]
    fn test_document_type_options() {
        let options = document_type_options(SEARCH_PAGE).unwrap();
        assert_eq!(options.len(), 3);
        assert_eq!(options[1].label, "Koninklijk besluit");
        assert_eq!(options[1].value, "Koninklijk besluit");
        // Missing value attribute falls back to the label
        assert_eq!(options[2].value, "Ministerieel besluit");
    }

    #[test]
    fn test_document_type_options_missing_select() {
        let err = document_type_options("<html><body><p>leeg</p></body></html>");
        assert!(matches!(
            err,
            Err(ScraperError::MissingFormElement { element }) if element.contains("dt")
        ));
    }

    #[test]
    fn test_validate_date_inputs_present() {
        assert!(validate_date_inputs(SEARCH_PAGE).is_ok());
    }

    #[test]
    fn test_validate_date_inputs_missing_end() {
        let html = r#"<form><select name="dt"></select><input name="pdd"></form>"#;
        let err = validate_date_inputs(html);
        assert!(matches!(
            err,
            Err(ScraperError::MissingFormElement { element }) if element.contains("pdf")
        ));
    }

    #[test]
    fn test_search_form_action() {
        assert_eq!(
            search_form_action(SEARCH_PAGE),
            Some("rech_res.pl".to_string())
        );
    }

    #[test]
    fn test_search_form_action_no_form() {
        let html = r#"<select name="dt"><option>X</option></select>"#;
        assert_eq!(search_form_action(html), None);
    }

    const RESULTS_PAGE: &str = r#"
<html><body>
  <div class="list">
    <div class="list-item--content">
      <a href="/doc/1">Koninklijk besluit
        betreffende de spoorwegen</a>
      <p class="list-item--date">10 MAART 2024</p>
    </div>
    <div class="list-item--button"> 2024001234 </div>
    <div class="list-item--content">
      <p>Item zonder link</p>
    </div>
    <div class="list-item--button">2024009999</div>
    <div class="list-item--content">
      <a href="/doc/3">Besluit zonder datum</a>
    </div>
    <div class="list-item--button">2024005678</div>
  </div>
</body></html>"#;

    #[test]
    fn test_result_entries() {
        let entries = result_entries(RESULTS_PAGE, "http://example.org");

        // The linkless item is dropped; positional pairing keeps the rest aligned
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].ref_number, "2024001234");
        assert_eq!(entries[0].pub_date, "10 MAART 2024");
        assert_eq!(
            entries[0].short_text,
            "Koninklijk besluit betreffende de spoorwegen"
        );
        assert_eq!(entries[0].url, "http://example.org/doc/1");

        assert_eq!(entries[1].ref_number, "2024005678");
        assert_eq!(entries[1].pub_date, "");
        assert_eq!(entries[1].url, "http://example.org/doc/3");
    }

    #[test]
    fn test_result_entries_empty_page() {
        assert!(result_entries("<html><body></body></html>", "http://x").is_empty());
    }

    #[test]
    fn test_next_page_href_present() {
        let html = r#"<a class="pagination-button pagination-next" href="rech_res.pl?page=2">volgende</a>"#;
        assert_eq!(next_page_href(html), Some("rech_res.pl?page=2".to_string()));
    }

    #[test]
    fn test_next_page_href_absent() {
        let html = r#"<a class="pagination-button pagination-prev" href="rech_res.pl?page=1">vorige</a>"#;
        assert_eq!(next_page_href(html), None);
    }

    const DETAIL_PAGE: &str = r#"
<html><body>
  <main class="page__inner page__inner--content article-text">
    <p>  FILIP, Koning der Belgen,
      aan allen die nu zijn en hierna wezen zullen.</p>
    <p>Tweede alinea.</p>
  </main>
</body></html>"#;

    #[test]
    fn test_article_body_first_paragraph() {
        let body = article_body(DETAIL_PAGE).unwrap();
        assert_eq!(
            body,
            "FILIP, Koning der Belgen, aan allen die nu zijn en hierna wezen zullen."
        );
    }

    #[test]
    fn test_article_body_missing_container() {
        assert_eq!(article_body("<html><body><p>los</p></body></html>"), None);
    }

    #[test]
    fn test_article_body_container_without_paragraph() {
        let html = r#"<main class="page__inner page__inner--content article-text"><div>geen p</div></main>"#;
        assert_eq!(article_body(html), None);
    }
}
