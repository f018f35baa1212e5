//! Job tools implemented with RMCP attribute macros

use std::sync::Arc;

use rmcp::{
    Error, ServerHandler,
    handler::server::tool::ToolBox,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    schemars, tool,
};
use tracing::error;

use crate::offer::{Criteria, ProgrammingLanguage};
use crate::service::JobService;

const INSTRUCTIONS: &str = "Search job boards for programming offers, inspect posting sites \
and keep a list of saved postings. Use get_offers to list offers for a language, \
save_posting to remember one, list_saved_postings to review them and delete_posting to \
forget one.";

/// MCP handler wrapping a [`JobService`]
#[derive(Clone)]
pub struct JobTools {
    service: Arc<JobService>,
}

/// Invalid input stays `invalid_request`; everything else is an internal error
fn tool_error(context: &str, err: crate::Error) -> Error {
    match err {
        crate::Error::InvalidRequest(message) => Error::invalid_request(message, None),
        err => {
            error!("{}: {}", context, err);
            Error::internal_error(format!("{}: {}", context, err), None)
        }
    }
}

#[tool(tool_box)]
impl JobTools {
    pub fn new(service: Arc<JobService>) -> Self {
        Self { service }
    }

    pub fn get_tool_box() -> &'static ToolBox<Self> {
        Self::tool_box()
    }

    #[tool(
        description = "List job offers for a programming language. Offers are rendered as Markdown and separated by a blank line. Optional criteria narrow the results by keywords found in the offer title or tags."
    )]
    async fn get_offers(
        &self,
        #[tool(param)]
        #[schemars(description = "Programming language to search offers for, e.g. Rust or C++")]
        language: ProgrammingLanguage,
        #[tool(param)]
        #[schemars(
            description = "Keyword filters: offers must contain one of `include` (when given) and none of `exclude`"
        )]
        criteria: Option<Criteria>,
        #[tool(param)]
        #[schemars(description = "Maximum number of offers to return (default 50)")]
        limit: Option<usize>,
    ) -> Result<CallToolResult, Error> {
        let offers = self
            .service
            .get_offers(language, criteria.unwrap_or_default(), limit)
            .await;
        Ok(CallToolResult::success(vec![Content::text(offers)]))
    }

    #[tool(
        description = "Describe the website hosting a job posting: its host name and the response headers it sends. Leave the URL empty to inspect the default job board."
    )]
    async fn get_offer_information(
        &self,
        #[tool(param)]
        #[schemars(description = "URL of the posting or site to inspect")]
        posting_url: String,
    ) -> Result<CallToolResult, Error> {
        let information = self.service.get_offer_information(&posting_url).await;
        Ok(CallToolResult::success(vec![Content::text(information)]))
    }

    #[tool(description = "Save a job posting so it can be reviewed later. Returns the id of the saved posting.")]
    async fn save_posting(
        &self,
        #[tool(param)]
        #[schemars(description = "Title of the posting")]
        name: String,
        #[tool(param)]
        #[schemars(description = "Link to the posting")]
        url: String,
    ) -> Result<CallToolResult, Error> {
        let id = self
            .service
            .save_posting(&name, &url)
            .await
            .map_err(|e| tool_error("Failed to save posting", e))?;

        Ok(CallToolResult::success(vec![Content::text(id.to_string())]))
    }

    #[tool(description = "Delete a saved job posting by id.")]
    async fn delete_posting(
        &self,
        #[tool(param)]
        #[schemars(description = "Id of the saved posting")]
        id: i64,
    ) -> Result<CallToolResult, Error> {
        let removed = self
            .service
            .delete_posting(id)
            .await
            .map_err(|e| tool_error("Failed to delete posting", e))?;

        let message = if removed {
            format!("Deleted posting {}", id)
        } else {
            format!("No saved posting with id {}", id)
        };
        Ok(CallToolResult::success(vec![Content::text(message)]))
    }

    #[tool(description = "List every saved job posting as JSON records with id, name and url.")]
    async fn list_saved_postings(&self) -> Result<CallToolResult, Error> {
        let postings = self
            .service
            .list_saved_postings()
            .await
            .map_err(|e| tool_error("Failed to list saved postings", e))?;

        let json = serde_json::to_string(&postings)
            .map_err(|e| tool_error("Failed to encode saved postings", e.into()))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool(tool_box)]
impl ServerHandler for JobTools {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
