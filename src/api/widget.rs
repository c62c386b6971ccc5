use axum::response::Html;

const WIDGET_HTML: &str = include_str!("../../assets/widget.html");

pub async fn widget() -> Html<&'static str> {
    Html(WIDGET_HTML)
}
