use actix_web::{web, HttpResponse, Responder};

use crate::core::content::LegalDoc;
use crate::core::form::{FormAction, SearchForm};
use crate::core::view::ViewState;
use crate::models::{PageForm, PageQuery, PassengerKind};
use crate::routes::render::render_page;
use crate::routes::AppState;

/// Configure the HTML page routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(show_page))
        .route("/", web::post().to(submit_page));
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// Rebuild the view state carried by a request
fn restore_state(state: &AppState, form: SearchForm, faq: Option<usize>) -> ViewState {
    let mut view = ViewState::new(form, state.max_passengers_per_kind);
    for kind in PassengerKind::ALL {
        view = view.adjust_passenger(kind, 0);
    }
    match faq {
        Some(index) => view.toggle_faq(index),
        None => view,
    }
}

/// GET /?faq={index}&legal={privacy|terms}
async fn show_page(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> impl Responder {
    let mut view = restore_state(&state, SearchForm::default(), query.faq);

    if let Some(doc) = query.legal.as_deref().and_then(LegalDoc::parse) {
        view = view.open_legal(doc);
    }

    html(render_page(&view))
}

/// POST / with the search form
///
/// Stepper buttons re-render the form with the adjusted counts. The search
/// button runs one search and renders its outcome.
async fn submit_page(
    state: web::Data<AppState>,
    form: web::Form<PageForm>,
) -> impl Responder {
    let form = form.into_inner();

    let search_form = SearchForm::new(form.to_query());
    let view = restore_state(&state, search_form, form.faq);

    let action = match FormAction::parse(&form.action) {
        Ok(action) => action,
        Err(e) => {
            tracing::info!("Rejected page form: {}", e);
            return HttpResponse::BadRequest()
                .content_type("text/html; charset=utf-8")
                .body(render_page(&view));
        }
    };

    if action != FormAction::Search {
        return html(render_page(&view.apply_action(action)));
    }

    let (view, submitted) = view.submit();
    let view = match submitted {
        Some((ticket, query)) => {
            let outcome = state.search.search(&query).await;
            view.resolve(ticket, outcome)
        }
        None => view,
    };

    html(render_page(&view))
}
