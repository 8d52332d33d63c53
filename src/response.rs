//! The uniform result of a dispatched request.

use serde::de::DeserializeOwned;

use crate::error::RequestError;

/// Outcome of a single request attempt.
///
/// Always returned, never absent: a failed attempt carries an empty body,
/// status `0` and the error. Check [`err`](Self::err) before trusting the body.
#[derive(Debug)]
pub struct Response {
    data: Vec<u8>,
    code: u16,
    err: Option<RequestError>,
}

impl Response {
    pub(crate) fn success(data: Vec<u8>, code: u16) -> Self {
        Self {
            data,
            code,
            err: None,
        }
    }

    pub(crate) fn failure(err: RequestError) -> Self {
        Self {
            data: Vec::new(),
            code: 0,
            err: Some(err),
        }
    }

    /// Body decoded as UTF-8, with invalid sequences replaced.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }

    /// Deserializes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the body is not valid JSON for `T`,
    /// including when the request itself failed and the body is empty.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.data)
    }

    /// Raw body bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// HTTP status code, or `0` if the request never completed.
    #[must_use]
    pub fn code(&self) -> u16 {
        self.code
    }

    /// The error that ended the attempt, if any.
    #[must_use]
    pub fn err(&self) -> Option<&RequestError> {
        self.err.as_ref()
    }

    /// True when the request completed, whatever the status code.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.err.is_none()
    }

    /// Splits into `(status, body)` or the error.
    ///
    /// # Errors
    ///
    /// Returns the carried [`RequestError`] when the attempt failed.
    pub fn into_result(self) -> Result<(u16, Vec<u8>), RequestError> {
        match self.err {
            Some(err) => Err(err),
            None => Ok((self.code, self.data)),
        }
    }
}
