use std::marker::PhantomData;

use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::github::rate_limiter::RateLimiter;

/// One page of a listing endpoint plus the URL of the page after it.
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

#[derive(Clone, Copy)]
pub struct Paginator<'a> {
    client: &'a Client,
    rate_limiter: &'a RateLimiter,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a Client, rate_limiter: &'a RateLimiter) -> Self {
        Self {
            client,
            rate_limiter,
        }
    }

    pub async fn fetch_page<T: DeserializeOwned>(&self, url: &str) -> Result<Page<T>> {
        tracing::debug!("Fetching: {}", url);
        let response = self.client.get(url).send().await?;
        self.rate_limiter.update_from_headers(response.headers());

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthorized);
        }
        if let Some(wait) = self.rate_limiter.rate_limit_wait(status, response.headers()) {
            tracing::debug!("Rate limited on {} ({}), retry in {}s", url, status, wait);
            return Err(Error::RateLimited(wait));
        }
        if !status.is_success() {
            tracing::debug!("Request to {} failed with {}", url, status);
            return Err(Error::Http {
                status,
                url: url.to_string(),
            });
        }

        let next = response
            .headers()
            .get(header::LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(next_link);

        // GitHub answers 204 with no body for some empty listings.
        if status == StatusCode::NO_CONTENT {
            return Ok(Page {
                items: Vec::new(),
                next,
            });
        }

        let items: Vec<T> = response.json().await?;
        Ok(Page { items, next })
    }

    /// Follows `next` links until they run out and concatenates every page.
    pub async fn fetch_all<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        let mut all_items = Vec::new();
        let mut pages = self.pages::<T>(url);

        while let Some(items) = pages.next_page().await? {
            all_items.extend(items);
        }

        Ok(all_items)
    }

    /// Lazy cursor over the pages of a listing; nothing is requested until
    /// [`Pages::next_page`] is awaited.
    pub fn pages<T: DeserializeOwned>(&self, url: &str) -> Pages<'a, T> {
        Pages {
            paginator: *self,
            next_url: Some(url.to_string()),
            _marker: PhantomData,
        }
    }
}

pub struct Pages<'a, T> {
    paginator: Paginator<'a>,
    next_url: Option<String>,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: DeserializeOwned> Pages<'a, T> {
    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>> {
        let url = match self.next_url.take() {
            Some(url) => url,
            None => return Ok(None),
        };

        let page = self.paginator.fetch_page::<T>(&url).await?;
        self.next_url = page.next.filter(|next| *next != url);
        Ok(Some(page.items))
    }
}

/// Extracts the `rel="next"` target from a `Link` header.
pub fn next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|part| {
        let mut segments = part.split(';');
        let target = segments.next()?.trim();
        let url = target.strip_prefix('<')?.strip_suffix('>')?;

        let is_next = segments.any(|param| {
            let param = param.trim();
            match param.split_once('=') {
                Some((key, value)) if key.trim().eq_ignore_ascii_case("rel") => value
                    .trim()
                    .trim_matches('"')
                    .split_whitespace()
                    .any(|rel| rel.eq_ignore_ascii_case("next")),
                _ => false,
            }
        });

        is_next.then(|| url.to_string())
    })
}
