//! DOM controller: owns the page state and wires the input, caption and body
//! listeners. Caption spans are never bound individually; one delegated
//! listener per event type resolves the span through its `data-word`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, HtmlElement, HtmlImageElement, HtmlInputElement, MouseEvent, Node, window,
};

use crate::caption::{WORD_ATTR, WORD_CLASS, last_recognized, render_html, render_tokens};
use crate::config::GameConfig;
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::http::BrowserHttp;
use crate::wiki::WikiClient;

struct App {
    dictionary: Dictionary,
    has_typed: bool,
    caption: HtmlElement,
    image: HtmlImageElement,
    input: HtmlInputElement,
    tooltip: HtmlElement,
    wiki: Rc<WikiClient<BrowserHttp>>,
    /// Marked span currently under the pointer.
    hovered: Option<Element>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

fn with_app<R>(f: impl FnOnce(&mut App) -> R) -> Option<R> {
    APP.with(|cell| match cell.try_borrow_mut() {
        Ok(mut borrow) => borrow.as_mut().map(f),
        Err(_) => {
            log::warn!("app state busy, event dropped");
            None
        }
    })
}

pub fn start(config: GameConfig) -> Result<()> {
    let win = window().ok_or_else(|| Error::Dom("no window".into()))?;
    let doc = win
        .document()
        .ok_or_else(|| Error::Dom("no document".into()))?;
    let body = doc.body().ok_or_else(|| Error::Dom("no body".into()))?;

    let caption: HtmlElement = element_by_id(&doc, &config.caption_id)?;
    let image: HtmlImageElement = element_by_id(&doc, &config.image_id)?;
    let input: HtmlInputElement = element_by_id(&doc, &config.input_id)?;
    let tooltip = ensure_tooltip(&doc, &body, &config.tooltip_id)?;

    caption.set_inner_text(&config.placeholder_caption);
    focus_input(&input);

    let word_list_url = config.word_list_url.clone();
    let app = App {
        dictionary: Dictionary::default(),
        has_typed: false,
        caption: caption.clone(),
        image,
        input: input.clone(),
        tooltip,
        wiki: Rc::new(WikiClient::new(BrowserHttp, &config)),
        hovered: None,
    };
    APP.with(|cell| *cell.borrow_mut() = Some(app));

    attach_listeners(&body, &caption, &input)?;
    log::info!("wiki-caption: started, loading {word_list_url}");
    spawn_local(load_dictionary(word_list_url));
    Ok(())
}

fn element_by_id<T: JsCast>(doc: &Document, id: &str) -> Result<T> {
    doc.get_element_by_id(id)
        .ok_or_else(|| Error::Dom(format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| Error::Dom(format!("element #{id} has unexpected type")))
}

/// Reuses an existing tooltip element with `id` or creates and styles a new one.
fn ensure_tooltip(doc: &Document, body: &HtmlElement, id: &str) -> Result<HtmlElement> {
    if let Some(el) = doc.get_element_by_id(id) {
        return el
            .dyn_into()
            .map_err(|_| Error::Dom(format!("element #{id} has unexpected type")));
    }
    let tooltip: HtmlElement = doc
        .create_element("div")
        .map_err(Error::dom)?
        .dyn_into()
        .map_err(|el: Element| Error::dom(el.into()))?;
    tooltip.set_id(id);
    let style = tooltip.style();
    for (prop, value) in [
        ("position", "absolute"),
        ("padding", "10px"),
        ("background", "#fff"),
        ("color", "#000"),
        ("border", "1px solid #ccc"),
        ("border-radius", "2px"),
        ("display", "none"),
        ("max-width", "250px"),
        ("font-size", "14px"),
    ] {
        style.set_property(prop, value).map_err(Error::dom)?;
    }
    body.append_child(&tooltip).map_err(Error::dom)?;
    Ok(tooltip)
}

fn attach_listeners(body: &HtmlElement, caption: &HtmlElement, input: &HtmlInputElement) -> Result<()> {
    // Keystrokes
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            on_input();
        }) as Box<dyn FnMut(_)>);
        input
            .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())
            .map_err(Error::dom)?;
        closure.forget();
    }

    // Click on a marked word loads its image
    {
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            if let Some((_, word)) = marked_span(&evt) {
                spawn_image_fetch(word);
            }
        }) as Box<dyn FnMut(_)>);
        caption
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(Error::dom)?;
        closure.forget();
    }

    // Entering a marked word loads its extract into the tooltip
    {
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            let Some((span, word)) = marked_span(&evt) else {
                return;
            };
            let entered = with_app(|app| {
                if app.hovered.as_ref() == Some(&span) {
                    false
                } else {
                    app.hovered = Some(span);
                    true
                }
            });
            if entered == Some(true) {
                spawn_extract_fetch(word);
            }
        }) as Box<dyn FnMut(_)>);
        caption
            .add_event_listener_with_callback("mouseover", closure.as_ref().unchecked_ref())
            .map_err(Error::dom)?;
        closure.forget();
    }

    // Tooltip follows the pointer while over a marked word
    {
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            if marked_span(&evt).is_none() {
                return;
            }
            with_app(|app| {
                set_style(&app.tooltip, "left", &format!("{}px", evt.page_x() + 10));
                set_style(&app.tooltip, "top", &format!("{}px", evt.page_y() + 10));
            });
        }) as Box<dyn FnMut(_)>);
        caption
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())
            .map_err(Error::dom)?;
        closure.forget();
    }

    // Leaving a marked word hides the tooltip
    {
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            let Some((span, _)) = marked_span(&evt) else {
                return;
            };
            let still_inside = evt
                .related_target()
                .and_then(|t| t.dyn_into::<Node>().ok())
                .is_some_and(|node| span.contains(Some(&node)));
            if still_inside {
                return;
            }
            with_app(|app| {
                app.hovered = None;
                set_style(&app.tooltip, "display", "none");
            });
        }) as Box<dyn FnMut(_)>);
        caption
            .add_event_listener_with_callback("mouseout", closure.as_ref().unchecked_ref())
            .map_err(Error::dom)?;
        closure.forget();
    }

    // Any click on the page returns focus to the hidden input
    {
        let input = input.clone();
        let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            focus_input(&input);
        }) as Box<dyn FnMut(_)>);
        body.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(Error::dom)?;
        closure.forget();
    }

    Ok(())
}

fn set_style(el: &HtmlElement, prop: &str, value: &str) {
    if let Err(err) = el.style().set_property(prop, value) {
        log::debug!("setting {prop} failed: {}", Error::dom(err));
    }
}

fn focus_input(input: &HtmlInputElement) {
    if let Err(err) = input.focus() {
        log::debug!("focus failed: {}", Error::dom(err));
    }
}

/// The marked span containing the event target, with its `data-word`.
fn marked_span(evt: &MouseEvent) -> Option<(Element, String)> {
    let target: Element = evt.target()?.dyn_into().ok()?;
    let span = target.closest(&format!(".{WORD_CLASS}")).ok()??;
    let word = span.get_attribute(WORD_ATTR)?;
    Some((span, word))
}

fn on_input() {
    let last = with_app(|app| {
        let text = app.input.value().trim().to_string();
        if !app.has_typed && !text.is_empty() {
            app.has_typed = true;
            app.caption.set_inner_text("");
        }
        let tokens = render_tokens(&text, &app.dictionary);
        app.caption.set_inner_html(&render_html(&tokens));
        // spans were replaced, so the old hover target is gone
        app.hovered = None;
        last_recognized(&text, &app.dictionary)
    });
    if let Some(Some(word)) = last {
        spawn_image_fetch(word);
    }
}

async fn load_dictionary(url: String) {
    match Dictionary::load(&BrowserHttp, &url).await {
        Ok(dict) => {
            log::info!("loaded {} words from {url}", dict.len());
            let first = dict.random_word().map(str::to_string);
            with_app(|app| app.dictionary = dict);
            if let Some(word) = first {
                spawn_image_fetch(word);
            }
        }
        Err(err) => log::error!("error loading word list {url}: {err}"),
    }
}

// Fire-and-forget: overlapping fetches are not cancelled, the last response
// to arrive sets the image.
fn spawn_image_fetch(word: String) {
    let Some((wiki, image)) = with_app(|app| (app.wiki.clone(), app.image.clone())) else {
        return;
    };
    spawn_local(async move {
        let src = wiki.thumbnail_or_placeholder(&word).await;
        image.set_src(&src);
    });
}

fn spawn_extract_fetch(word: String) {
    let Some((wiki, tooltip)) = with_app(|app| (app.wiki.clone(), app.tooltip.clone())) else {
        return;
    };
    spawn_local(async move {
        let text = wiki.extract_or_fallback(&word).await;
        tooltip.set_text_content(Some(&text));
        set_style(&tooltip, "display", "block");
    });
}
