use utoipa::OpenApi;

use super::handlers;
use crate::model::TodoItem;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_todos,
        handlers::get_todo,
        handlers::create_todo,
        handlers::update_todo,
        handlers::delete_todo,
    ),
    components(schemas(TodoItem)),
    tags((name = "todos", description = "Todo item management"))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/todos"));
        assert!(paths.contains_key("/todos/{id}"));

        let json = serde_json::to_value(&doc).unwrap();
        let item = &json["paths"]["/todos/{id}"];
        assert!(item.get("get").is_some());
        assert!(item.get("put").is_some());
        assert!(item.get("delete").is_some());
    }
}
