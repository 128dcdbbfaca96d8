//! Server-side HTML rendering of the search page.
//!
//! Everything here is a pure function of [`ViewState`]. Model-supplied text is
//! escaped before it is written into the page.

use std::fmt::Write;

use crate::core::content::{badge, LegalDoc, FAQS};
use crate::core::view::ViewState;
use crate::models::{FlightDeal, PassengerKind, SearchResponse};

const STYLE: &str = r#"
body{font-family:system-ui,sans-serif;margin:0;background:#fcfdfe;color:#0f172a}
header,main,footer{max-width:1200px;margin:0 auto;padding:1rem}
.search-form{display:grid;grid-template-columns:repeat(auto-fit,minmax(180px,1fr));gap:1rem}
.stepper{display:flex;align-items:center;gap:.5rem}
.error{background:#fef2f2;border:2px solid #fee2e2;padding:1.5rem;border-radius:1rem}
.loading{text-align:center;padding:4rem}
.deals{display:grid;grid-template-columns:repeat(auto-fit,minmax(280px,1fr));gap:2rem}
.deal{border:1px solid #e2e8f0;border-radius:1rem;overflow:hidden}
.deal .body{padding:1.5rem}
.badge-cash{background:#dcfce7}.badge-miles{background:#dbeafe}.badge-premium{background:#fef3c7}
.summary{background:#0f172a;color:#cbd5e1;padding:2rem;border-radius:2rem;white-space:pre-wrap}
.modal{position:fixed;inset:0;background:rgba(15,23,42,.8);display:flex;align-items:center;justify-content:center}
.modal .sheet{background:#fff;max-width:900px;max-height:80vh;overflow-y:auto;padding:2rem;border-radius:2rem}
.offscreen{position:absolute;left:-9999px}
"#;

/// Escape text for use in element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Only http(s) links are rendered as clickable
fn safe_link(link: &str) -> Option<&str> {
    let link = link.trim();
    let lower = link.to_ascii_lowercase();
    (lower.starts_with("https://") || lower.starts_with("http://")).then_some(link)
}

/// URL that reproduces the toggle state of `state`
pub fn page_href(state: &ViewState) -> String {
    let mut params = Vec::new();
    if let Some(index) = state.open_faq {
        params.push(format!("faq={}", index));
    }
    if let Some(doc) = state.legal {
        params.push(format!("legal={}", doc.slug()));
    }

    if params.is_empty() {
        "/".to_string()
    } else {
        format!("/?{}", params.join("&"))
    }
}

pub fn render_page(state: &ViewState) -> String {
    let mut html = String::with_capacity(16 * 1024);

    html.push_str("<!DOCTYPE html><html lang=\"pt-BR\"><head><meta charset=\"utf-8\">");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    html.push_str("<title>FlyAgente AI - Passagens Aéreas Baratas</title>");
    let _ = write!(html, "<style>{}</style></head><body>", STYLE);

    if let Some(doc) = state.legal {
        render_legal_modal(&mut html, state, doc);
    }

    html.push_str("<header><a href=\"/\"><strong>FlyAgente AI</strong></a> ");
    html.push_str("<nav><a href=\"#search\">Buscar Passagens</a> <a href=\"#about\">Como Funciona</a> <a href=\"#faq\">Dúvidas</a></nav></header>");

    html.push_str("<main>");
    html.push_str("<section id=\"search\"><h1>A IA Especialista em Passagens Aéreas Baratas</h1>");
    render_form(&mut html, state);
    html.push_str("</section>");

    html.push_str("<section id=\"results\">");
    if let Some(message) = state.error() {
        let _ = write!(
            html,
            "<div class=\"error\" role=\"alert\"><h3>Atenção ao buscar passagens</h3><p>{}</p></div>",
            escape_html(message)
        );
    }
    if state.is_loading() {
        html.push_str("<div class=\"loading\" aria-busy=\"true\"><h2>Localizando Preço Real...</h2>");
        html.push_str("<p>Analisando OTAs, voos low-cost e bases de milhas em tempo real.</p></div>");
    }
    if let Some(results) = state.results() {
        render_results(&mut html, results);
    }
    html.push_str("</section>");

    render_faq(&mut html, state);

    html.push_str("<section id=\"about\"><h2>Democratizando o acesso às melhores passagens aéreas</h2>");
    html.push_str("<p>Nós não apenas listamos preços; nós analisamos o mercado global para você.</p></section>");
    html.push_str("</main>");

    render_footer(&mut html, state);

    html.push_str("</body></html>");
    html
}

fn render_form(html: &mut String, state: &ViewState) {
    let query = &state.form.query;

    html.push_str("<form method=\"post\" action=\"/#results\" class=\"search-form\">");
    // Enter in a text field triggers the first submit button
    html.push_str("<button type=\"submit\" name=\"action\" value=\"search\" class=\"offscreen\" tabindex=\"-1\" aria-hidden=\"true\"></button>");

    let text_fields = [
        ("origin", "Origem", "text", "Qualquer lugar", &query.origin),
        ("destination", "Destino", "text", "Para onde você vai?", &query.destination),
        ("departureDate", "Ida", "date", "", &query.departure_date),
        ("returnDate", "Volta", "date", "", &query.return_date),
    ];
    for (name, label, kind, placeholder, value) in text_fields {
        let _ = write!(
            html,
            "<label>{label} <input type=\"{kind}\" name=\"{name}\" placeholder=\"{placeholder}\" value=\"{value}\"></label>",
            label = label,
            kind = kind,
            name = name,
            placeholder = placeholder,
            value = escape_html(value),
        );
    }

    let _ = write!(
        html,
        "<fieldset><legend>Passageiros</legend><p>Total <strong class=\"total\">{}</strong></p>",
        query.total_passengers()
    );
    for kind in PassengerKind::ALL {
        let label = match kind {
            PassengerKind::Adults => "Adultos",
            PassengerKind::Children => "2-11 anos",
            PassengerKind::Infants => "Bebê (-2)",
        };
        let count = state.form.count(kind);
        let _ = write!(
            html,
            "<div class=\"stepper\"><span>{label}</span>\
             <button type=\"submit\" name=\"action\" value=\"dec:{kind}\" aria-label=\"menos\">-</button>\
             <span data-kind=\"{kind}\">{count}</span>\
             <button type=\"submit\" name=\"action\" value=\"inc:{kind}\" aria-label=\"mais\">+</button>\
             <input type=\"hidden\" name=\"{kind}\" value=\"{count}\"></div>",
            label = label,
            kind = kind.as_str(),
            count = count,
        );
    }
    html.push_str("</fieldset>");

    if let Some(index) = state.open_faq {
        let _ = write!(html, "<input type=\"hidden\" name=\"faq\" value=\"{}\">", index);
    }

    if state.is_loading() {
        html.push_str("<button type=\"submit\" name=\"action\" value=\"search\" disabled>Varrendo Bases de Dados Globais...</button>");
    } else {
        html.push_str("<button type=\"submit\" name=\"action\" value=\"search\">Buscar Passagens Aéreas Baratas</button>");
    }
    html.push_str("</form>");
}

fn render_results(html: &mut String, results: &SearchResponse) {
    html.push_str("<h2>Ofertas Encontradas</h2><div class=\"deals\">");
    for deal in &results.deals {
        render_deal(html, deal);
    }
    html.push_str("</div>");

    let _ = write!(
        html,
        "<div class=\"summary\"><h3>Análise Estratégica do FlyAgente</h3><div>{}</div></div>",
        escape_html(&results.summary)
    );

    let mut sources = results.sources().peekable();
    if sources.peek().is_some() {
        html.push_str("<div class=\"sources\"><h4>Fontes consultadas</h4><ul>");
        for source in sources {
            let title = if source.title.is_empty() { &source.uri } else { &source.title };
            match safe_link(&source.uri) {
                Some(uri) => {
                    let _ = write!(
                        html,
                        "<li><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></li>",
                        escape_html(uri),
                        escape_html(title)
                    );
                }
                None => {
                    let _ = write!(html, "<li>{}</li>", escape_html(title));
                }
            }
        }
        html.push_str("</ul></div>");
    }
}

fn render_deal(html: &mut String, deal: &FlightDeal) {
    let badge = badge(deal.deal_type);

    let _ = write!(
        html,
        "<article class=\"deal\" data-type=\"{}\"><div class=\"{}\">{}</div><div class=\"body\">",
        deal.deal_type.as_str(),
        badge.css_class,
        badge.label
    );
    let _ = write!(
        html,
        "<h3>{}</h3><p>{}</p>",
        escape_html(&deal.price),
        escape_html(&deal.airline)
    );
    if deal.is_total_with_taxes {
        html.push_str("<span class=\"taxes\">TOTAL C/ TAXAS</span>");
    }
    let _ = write!(
        html,
        "<p><em>\"{}\"</em></p><h4>Como Comprar:</h4><p>{}</p>",
        escape_html(&deal.description),
        escape_html(&deal.how_to_buy)
    );
    if let Some(link) = safe_link(&deal.link) {
        let _ = write!(
            html,
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Ver Passagem no Site</a>",
            escape_html(link)
        );
    }
    html.push_str("</div></article>");
}

fn render_faq(html: &mut String, state: &ViewState) {
    html.push_str("<section id=\"faq\"><h2>Dúvidas Frequentes</h2>");
    for (index, faq) in FAQS.iter().enumerate() {
        let open = state.open_faq == Some(index);
        let toggled = state.clone().toggle_faq(index);
        let _ = write!(
            html,
            "<div class=\"faq-entry\"><a href=\"{}#faq\" aria-expanded=\"{}\">{}</a>",
            escape_html(&page_href(&toggled)),
            open,
            faq.question
        );
        if open {
            let _ = write!(html, "<div class=\"faq-answer\">{}</div>", faq.answer);
        }
        html.push_str("</div>");
    }
    html.push_str("</section>");
}

fn render_legal_modal(html: &mut String, state: &ViewState, doc: LegalDoc) {
    let text = doc.text();
    let close = escape_html(&page_href(&state.clone().close_legal()));

    let _ = write!(
        html,
        "<div class=\"modal\" role=\"dialog\" data-doc=\"{}\"><div class=\"sheet\"><h2>{}</h2><a href=\"{}\">Fechar</a><p><strong>{}</strong></p>",
        doc.slug(),
        text.title,
        close,
        text.intro
    );
    for section in text.sections {
        let _ = write!(html, "<h3>{}</h3><p>{}</p>", section.heading, section.body);
    }
    let _ = write!(html, "<a href=\"{}\">Entendido</a></div></div>", close);
}

fn render_footer(html: &mut String, state: &ViewState) {
    let privacy = escape_html(&page_href(&state.clone().open_legal(LegalDoc::Privacy)));
    let terms = escape_html(&page_href(&state.clone().open_legal(LegalDoc::Terms)));

    let _ = write!(
        html,
        "<footer><p>O buscador definitivo para quem busca economizar de verdade em suas viagens aéreas.</p>\
         <ul><li><a href=\"{}\">Privacidade</a></li><li><a href=\"{}\">Termos de Uso</a></li></ul>\
         <p>© 2025 FlyAgente AI - Inteligência Artificial para Turismo.</p></footer>",
        privacy, terms
    );
}
