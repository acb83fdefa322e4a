//! GraphQL endpoint.

use actix_web::{HttpResponse, web};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use crate::config::GraphqlConfig;
use crate::graphql::AppSchema;
use crate::observability::RequestId;

/// POST /graphql
pub async fn execute(
    schema: web::Data<AppSchema>,
    request_id: RequestId,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let request = request.into_inner();
    tracing::debug!(
        request_id = request_id.as_str(),
        operation = request.operation_name.as_deref(),
        "Executing GraphQL request"
    );

    schema.execute(request.data(request_id)).await.into()
}

/// GET /graphql - GraphiQL IDE, when enabled.
pub async fn graphiql(config: web::Data<GraphqlConfig>) -> HttpResponse {
    if !config.graphiql_enabled {
        return HttpResponse::NotFound().finish();
    }

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}
