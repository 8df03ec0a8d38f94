/// # RedirectOptions
/// Values used to build the consent url. Anything left out falls back to the client config.
#[derive(Debug, Default, Clone)]
pub struct RedirectOptions {
    /// Purpose of requesting the data, shown to the user
    pub purpose: Option<String>,
    /// Attributes the user must consent to provide
    pub requested_attributes: Option<Vec<String>>,
    /// State forwarded to the redirect endpoint
    pub relay_state: Option<String>,
    /// Alternative redirect endpoint
    pub redirect_endpoint: Option<String>,
}

impl RedirectOptions {
    /// Sets the purpose
    pub fn purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    /// Sets the requested attributes
    pub fn requested_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requested_attributes = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the relay state
    pub fn relay_state(mut self, relay_state: impl Into<String>) -> Self {
        self.relay_state = Some(relay_state.into());
        self
    }

    /// Overrides the configured redirect endpoint
    pub fn redirect_endpoint(mut self, redirect_endpoint: impl Into<String>) -> Self {
        self.redirect_endpoint = Some(redirect_endpoint.into());
        self
    }
}
