use crate::app::App;
use crate::domain::FilterCriteria;
use crate::errors::ServerError;
use crate::map::{MapProvider, MarkerHandle};
use crate::page::{ElementId, UiAction};
use crate::responses::{html_response, text_response, ResultResp};
use astra::Request;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;
use tracing::debug;

/// Every interaction is a GET: the route becomes a UI event, the app runs
/// it to completion and the whole page is rendered back.
pub fn handle<P: MapProvider>(req: Request, app: &Mutex<App<P>>) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    let query = req.uri().query().unwrap_or("");

    debug!(method, path, query, "request");

    match (method, path) {
        ("GET", "/healthz") => text_response("ok"),
        ("GET", "/") => render(app, |_| {}),
        ("GET", "/reload") => render(app, |app| app.dispatch(UiAction::LoadAll)),
        ("GET", "/search") => {
            let criteria = FilterCriteria::from_form(query)?;
            render(app, move |app| app.dispatch(UiAction::Search(criteria)))
        }
        ("GET", "/select") => {
            let id = param(query, "id")?;
            render(app, |app| {
                app.click(ElementId::ListItem(id));
            })
        }
        ("GET", "/marker") => {
            let handle = MarkerHandle(param(query, "handle")?);
            render(app, |app| {
                app.click(ElementId::Marker(handle));
            })
        }
        ("GET", "/detail") => {
            let id = param(query, "id")?;
            render(app, |app| {
                app.click(ElementId::InfoWindowDetail(id));
            })
        }
        ("GET", "/modal/close") => {
            let element = match parse_query(query).get("source").map(String::as_str) {
                Some("backdrop") => ElementId::ModalBackdrop,
                _ => ElementId::ModalClose,
            };
            render(app, |app| {
                app.click(element);
            })
        }
        _ => Err(ServerError::NotFound),
    }
}

fn render<P, F>(app: &Mutex<App<P>>, action: F) -> ResultResp
where
    P: MapProvider,
    F: FnOnce(&mut App<P>),
{
    let mut app = app.lock().map_err(|_| ServerError::InternalError)?;
    action(&mut app);

    let budget = app.render_wait();
    app.settle_within(budget);
    if app.pending() > 0 {
        debug!(pending = app.pending(), "rendering with requests still in flight");
    }

    html_response(app.render_page())
}

fn parse_query(query: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

fn param<T: FromStr>(query: &str, key: &str) -> Result<T, ServerError> {
    let params = parse_query(query);
    let raw = params
        .get(key)
        .ok_or_else(|| ServerError::BadRequest(format!("missing {key}")))?;

    raw.trim()
        .parse()
        .map_err(|_| ServerError::BadRequest(format!("invalid {key}: {raw}")))
}
