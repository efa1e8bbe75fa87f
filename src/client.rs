//! Typed HTTP client with bounded retry
//!
//! Presentation callers talk to the API through this client. Transient
//! transport failures are retried on a fixed delay up to a bounded
//! attempt count; an HTTP error status is never retried - the server
//! answered, and the answer is surfaced as [`Error::UnexpectedStatus`].

use std::time::Duration;

use crate::aggregate::AggregateShift;
use crate::api::{
    CreatedResponse, OverallAverageResponse, SelectionAverageResponse, SelectionRequest,
    SemesterAverageEntry, SimulateRequest, SimulateResponse, YearAverageEntry,
};
use crate::course::{CourseDraft, CourseRecord};
use crate::{Error, Result};

/// Bounded fixed-delay retry policy for transport failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Create a policy with the given attempt budget and inter-attempt
    /// delay. An attempt budget of zero still performs one attempt.
    #[must_use]
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Get the maximum number of attempts.
    #[must_use]
    pub const fn max_attempts(self) -> u32 {
        self.max_attempts
    }

    /// Get the delay between attempts.
    #[must_use]
    pub const fn delay(self) -> Duration {
        self.delay
    }
}

impl Default for RetryPolicy {
    /// Three attempts, three seconds apart.
    fn default() -> Self {
        Self::new(3, Duration::from_secs(3))
    }
}

/// HTTP client for the gradebook API.
pub struct Client {
    base_url: String,
    http: reqwest::Client,
    retry: RetryPolicy,
}

impl Client {
    /// Create a client for the API at `base_url` with the default
    /// retry policy.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
            retry: RetryPolicy::default(),
        }
    }

    /// Replace the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send_with_retry<F>(&self, build: F) -> Result<reqwest::Response>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match build().send().await {
                Ok(response) => return Self::expect_success(response).await,
                Err(err) => {
                    if attempt >= self.retry.max_attempts() {
                        return Err(Error::RetriesExhausted {
                            attempts: attempt,
                            source: err,
                        });
                    }
                    tracing::warn!(attempt, error = %err, "transport error, retrying");
                    tokio::time::sleep(self.retry.delay()).await;
                }
            }
        }
    }

    async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(Error::UnexpectedStatus { status, body })
    }

    /// Create a course; returns the store-assigned id.
    ///
    /// # Errors
    ///
    /// [`Error::UnexpectedStatus`] on rejection,
    /// [`Error::RetriesExhausted`] when the server stays unreachable.
    pub async fn create_course(&self, draft: &CourseDraft) -> Result<String> {
        let url = self.url("/courses");
        let response = self
            .send_with_retry(|| self.http.post(&url).json(draft))
            .await?;
        let created: CreatedResponse = response.json().await?;
        Ok(created.id)
    }

    /// Fetch one course by id.
    ///
    /// # Errors
    ///
    /// See [`Client::create_course`].
    pub async fn get_course(&self, id: &str) -> Result<CourseRecord> {
        let url = self.url(&format!("/courses/{id}"));
        let response = self.send_with_retry(|| self.http.get(&url)).await?;
        Ok(response.json().await?)
    }

    /// Replace every field of an existing course.
    ///
    /// # Errors
    ///
    /// See [`Client::create_course`].
    pub async fn update_course(&self, id: &str, draft: &CourseDraft) -> Result<()> {
        let url = self.url(&format!("/courses/{id}"));
        self.send_with_retry(|| self.http.put(&url).json(draft))
            .await?;
        Ok(())
    }

    /// Delete a course.
    ///
    /// # Errors
    ///
    /// See [`Client::create_course`].
    pub async fn delete_course(&self, id: &str) -> Result<()> {
        let url = self.url(&format!("/courses/{id}"));
        self.send_with_retry(|| self.http.delete(&url)).await?;
        Ok(())
    }

    /// List every stored course.
    ///
    /// # Errors
    ///
    /// See [`Client::create_course`].
    pub async fn list_courses(&self) -> Result<Vec<CourseRecord>> {
        let url = self.url("/courses");
        let response = self.send_with_retry(|| self.http.get(&url)).await?;
        Ok(response.json().await?)
    }

    /// Overall weighted average plus course count.
    ///
    /// # Errors
    ///
    /// See [`Client::create_course`].
    pub async fn overall_average(&self) -> Result<OverallAverageResponse> {
        let url = self.url("/averages");
        let response = self.send_with_retry(|| self.http.get(&url)).await?;
        Ok(response.json().await?)
    }

    /// Weighted averages per year, ascending.
    ///
    /// # Errors
    ///
    /// See [`Client::create_course`].
    pub async fn averages_by_year(&self) -> Result<Vec<YearAverageEntry>> {
        let url = self.url("/averages/by-year");
        let response = self.send_with_retry(|| self.http.get(&url)).await?;
        Ok(response.json().await?)
    }

    /// Weighted averages per `(year, semester)` group, canonical order.
    ///
    /// # Errors
    ///
    /// See [`Client::create_course`].
    pub async fn averages_by_semester(&self) -> Result<Vec<SemesterAverageEntry>> {
        let url = self.url("/averages/by-semester");
        let response = self.send_with_retry(|| self.http.get(&url)).await?;
        Ok(response.json().await?)
    }

    /// Weighted average over the named courses; `None` when the
    /// selection matched nothing.
    ///
    /// # Errors
    ///
    /// See [`Client::create_course`].
    pub async fn selection_average(&self, names: Vec<String>) -> Result<Option<f64>> {
        let url = self.url("/averages/selection");
        let request = SelectionRequest { names };
        let response = self
            .send_with_retry(|| self.http.post(&url).json(&request))
            .await?;
        let body: SelectionAverageResponse = response.json().await?;
        Ok(body.average)
    }

    /// Simulate a grade change; returns the non-zero aggregate shifts.
    ///
    /// # Errors
    ///
    /// See [`Client::create_course`].
    pub async fn simulate(&self, id: &str, grade: u8) -> Result<Vec<AggregateShift>> {
        let url = self.url(&format!("/courses/{id}/simulate"));
        let request = SimulateRequest { grade };
        let response = self
            .send_with_retry(|| self.http.post(&url).json(&request))
            .await?;
        let body: SimulateResponse = response.json().await?;
        Ok(body.shifts)
    }
}
