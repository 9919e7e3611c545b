//! Search session: the stateful traversal of the gazette's search form.
//!
//! The session is a narrow capability interface so the pipeline's control
//! flow (type validation, pagination draining) can be exercised against a
//! scripted implementation. [`HttpSearchSession`] is the production
//! implementation, driving the form over plain blocking HTTP; a
//! browser-backed implementation would slot behind the same trait.

use std::time::Duration;

use reqwest::blocking::Client;
use url::Url;

use crate::config::{ScraperConfig, FORM_DATE_FORMAT};
use crate::error::{Result, ScraperError};
use crate::http::create_client;
use crate::parse;
use crate::types::{DocumentTypeQuery, ResultEntry};

/// One browser-equivalent traversal of the search form.
///
/// The expected call sequence per document type is `open_search`,
/// `list_document_types`, `open_search` again (selection state is not
/// assumed preserved), `submit_query`, then `next_page` until it returns
/// `None`. Sessions hold one current page and are never shared.
pub trait SearchSession {
    /// Load (or reload) the search form page.
    fn open_search(&mut self) -> Result<()>;

    /// Document-type labels the loaded form offers.
    ///
    /// This doubles as the caller-facing accessor for distinguishing an
    /// unsupported type from a type with zero results.
    fn list_document_types(&mut self) -> Result<Vec<String>>;

    /// Select a document type, fill the date range, submit the form.
    ///
    /// Returns the first results page's entries.
    fn submit_query(&mut self, query: &DocumentTypeQuery) -> Result<Vec<ResultEntry>>;

    /// Follow the next-page control.
    ///
    /// `Ok(None)` when pagination is exhausted.
    fn next_page(&mut self) -> Result<Option<Vec<ResultEntry>>>;
}

/// The page the session currently sits on.
struct LoadedPage {
    url: Url,
    html: String,
}

/// Blocking-HTTP implementation of [`SearchSession`].
///
/// Submits the search form as a GET of its action URL with the `dt`,
/// `pdd` and `pdf` parameters, then follows pagination hrefs resolved
/// against the current page URL.
pub struct HttpSearchSession {
    client: Client,
    config: ScraperConfig,
    page: Option<LoadedPage>,
}

impl HttpSearchSession {
    /// Create a session for one pipeline run.
    pub fn new(config: ScraperConfig) -> Result<Self> {
        let client = create_client(Duration::from_secs(config.navigation_timeout_secs))?;
        Ok(Self {
            client,
            config,
            page: None,
        })
    }

    /// Fetch a URL and make it the current page.
    fn load(&mut self, url: Url) -> Result<()> {
        let response = self.client.get(url).send()?.error_for_status()?;
        let url = response.url().clone();
        let html = response.text()?;
        self.page = Some(LoadedPage { url, html });
        Ok(())
    }

    /// The current page, loading the search form first if there is none.
    fn current_page(&mut self) -> Result<&LoadedPage> {
        if self.page.is_none() {
            self.open_search()?;
        }
        // Loaded above on the None path
        self.page
            .as_ref()
            .ok_or_else(|| ScraperError::MissingFormElement {
                element: "search page".to_string(),
            })
    }

    fn navigation_timeout(&self) -> ScraperError {
        ScraperError::NavigationTimeout {
            marker: self.config.results_marker.clone(),
            waited_secs: self.config.navigation_timeout_secs,
        }
    }
}

impl SearchSession for HttpSearchSession {
    fn open_search(&mut self) -> Result<()> {
        let url = Url::parse(&self.config.search_url)?;
        tracing::debug!(url = %url, "loading search page");
        self.load(url)
    }

    fn list_document_types(&mut self) -> Result<Vec<String>> {
        let page = self.current_page()?;
        let options = parse::document_type_options(&page.html)?;
        Ok(options.into_iter().map(|opt| opt.label).collect())
    }

    fn submit_query(&mut self, query: &DocumentTypeQuery) -> Result<Vec<ResultEntry>> {
        let page = self.current_page()?;

        parse::validate_date_inputs(&page.html)?;
        let options = parse::document_type_options(&page.html)?;
        let selected = options
            .into_iter()
            .find(|opt| opt.label == query.document_type)
            .ok_or_else(|| ScraperError::MissingFormElement {
                element: format!("option '{}' in select[name=dt]", query.document_type),
            })?;

        // No action attribute means the form posts back to its own page
        let action_url = match parse::search_form_action(&page.html) {
            Some(action) => page.url.join(&action)?,
            None => page.url.clone(),
        };

        tracing::info!(
            doc_type = %query.document_type,
            start = %query.start_date,
            end = %query.end_date,
            "submitting search"
        );

        let params = [
            ("dt", selected.value),
            ("pdd", query.start_date.format(FORM_DATE_FORMAT).to_string()),
            ("pdf", query.end_date.format(FORM_DATE_FORMAT).to_string()),
        ];
        let response = self
            .client
            .get(action_url)
            .query(&params)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    self.navigation_timeout()
                } else {
                    ScraperError::Http(e)
                }
            })?
            .error_for_status()?;

        // The results page announces itself through its URL
        if !response.url().as_str().contains(&self.config.results_marker) {
            tracing::warn!(url = %response.url(), "search did not land on a results page");
            return Err(self.navigation_timeout());
        }

        let url = response.url().clone();
        let html = response.text()?;
        let entries = parse::result_entries(&html, &self.config.detail_base_url);
        self.page = Some(LoadedPage { url, html });
        Ok(entries)
    }

    fn next_page(&mut self) -> Result<Option<Vec<ResultEntry>>> {
        let Some(page) = self.page.as_ref() else {
            return Ok(None);
        };

        let Some(href) = parse::next_page_href(&page.html) else {
            tracing::debug!("pagination exhausted");
            return Ok(None);
        };

        let next_url = match page.url.join(&href) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(error = %e, href = %href, "unusable next-page href, ending pagination");
                return Ok(None);
            }
        };

        // A failure while following the control ends pagination for this
        // type instead of aborting the run
        match self.load(next_url) {
            Ok(()) => {}
            Err(e) => {
                tracing::warn!(error = %e, "failed to follow next-page control, ending pagination");
                return Ok(None);
            }
        }

        let page = self
            .page
            .as_ref()
            .ok_or_else(|| ScraperError::MissingFormElement {
                element: "results page".to_string(),
            })?;
        Ok(Some(parse::result_entries(
            &page.html,
            &self.config.detail_base_url,
        )))
    }
}
