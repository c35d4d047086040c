//! Scenario-aware request sending
//!
//! [`ScenarioClient`] turns URL and body templates into requests by
//! resolving them through a [`ScenarioContext`], attaches the bearer token
//! registered for the request path and method, and records the response
//! back into the context.

use futures::future::join_all;
use orb_bdd_state::{ResponseState, ScenarioContext};
use serde_json::Value;
use tracing::{debug, info};

use crate::request::{url_path, HttpRequest, RequestBody, JSON_CONTENT_TYPE};
use crate::sender::RequestSender;
use crate::Result;

/// Sends templated requests on behalf of scenario steps
#[derive(Debug, Clone)]
pub struct ScenarioClient<S> {
    sender: S,
}

impl<S: RequestSender> ScenarioClient<S> {
    pub fn new(sender: S) -> Self {
        Self { sender }
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    /// Resolve templates and attach auth without sending anything
    pub fn prepare(
        &self,
        ctx: &ScenarioContext,
        method: &str,
        url_template: &str,
        body: Option<&RequestBody>,
    ) -> Result<HttpRequest> {
        let url = ctx.resolve(url_template)?;
        let path = url_path(&url)?;
        let token = ctx.get_auth_token(&path, method);

        let mut request = HttpRequest::new(method, url).with_bearer_token(token);

        match body {
            Some(RequestBody::Json(doc)) => {
                let resolved = ctx.resolve_vars(doc)?;
                request = request.with_body(serde_json::to_string(&resolved)?, JSON_CONTENT_TYPE);
            }
            Some(RequestBody::Raw {
                content,
                content_type,
            }) => {
                request = request.with_body(ctx.resolve(content)?, content_type);
            }
            None => {}
        }

        debug!(method, path = %path, authenticated = !token.is_empty(), "Prepared request");
        Ok(request)
    }

    /// Resolve, send and record the response in `ctx`
    pub async fn send(
        &self,
        ctx: &mut ScenarioContext,
        method: &str,
        url_template: &str,
        body: Option<RequestBody>,
    ) -> Result<ResponseState> {
        let request = self.prepare(ctx, method, url_template, body.as_ref())?;
        let response = self.sender.send(&request).await?;
        ctx.set_response(response.clone());
        Ok(response)
    }

    pub async fn get(&self, ctx: &mut ScenarioContext, url_template: &str) -> Result<ResponseState> {
        self.send(ctx, "GET", url_template, None).await
    }

    pub async fn post_json(
        &self,
        ctx: &mut ScenarioContext,
        url_template: &str,
        body: &Value,
    ) -> Result<ResponseState> {
        self.send(ctx, "POST", url_template, Some(RequestBody::Json(body.clone())))
            .await
    }

    pub async fn post_raw(
        &self,
        ctx: &mut ScenarioContext,
        url_template: &str,
        content: &str,
        content_type: &str,
    ) -> Result<ResponseState> {
        self.send(
            ctx,
            "POST",
            url_template,
            Some(RequestBody::raw(content, content_type)),
        )
        .await
    }

    /// Resolve once, then issue `count` copies of the request concurrently.
    ///
    /// The context is only read; responses are returned rather than recorded.
    pub async fn send_concurrent(
        &self,
        ctx: &ScenarioContext,
        method: &str,
        url_template: &str,
        body: Option<&RequestBody>,
        count: usize,
    ) -> Result<Vec<Result<ResponseState>>> {
        let request = self.prepare(ctx, method, url_template, body)?;
        info!(method, url = %request.url, count, "Sending concurrent requests");

        let sends = (0..count).map(|_| self.sender.send(&request));
        Ok(join_all(sends).await)
    }
}
