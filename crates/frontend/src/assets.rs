//! Image loading helpers: preload of critical assets and lazy loading of
//! deferred ones. Independent of the menu state.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry};

/// Emits a `<link rel="preload" as="image">` per critical image.
pub fn preload_critical_images(paths: &[&str]) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(head) = document.head() else {
        return;
    };
    for src in paths {
        if let Ok(link) = document.create_element("link") {
            let _ = link.set_attribute("rel", "preload");
            let _ = link.set_attribute("as", "image");
            let _ = link.set_attribute("href", src);
            let _ = head.append_child(&link);
        }
    }
}

/// Loads `img[loading="lazy"]` images when they scroll into view: the
/// `data-src` value is swapped into `src` and the image is unobserved.
pub fn observe_lazy_images() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Ok(images) = document.query_selector_all("img[loading=\"lazy\"]") else {
        return;
    };
    if images.length() == 0 {
        return;
    }

    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let Ok(img) = entry.target().dyn_into::<HtmlImageElement>() else {
                    continue;
                };
                if let Some(src) = img.get_attribute("data-src") {
                    img.set_src(&src);
                }
                observer.unobserve(&img);
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let observer = match IntersectionObserver::new(callback.as_ref().unchecked_ref()) {
        Ok(observer) => observer,
        Err(_) => return,
    };
    // observer lives for the page; keep the callback alive
    callback.forget();

    for i in 0..images.length() {
        if let Some(el) = images.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            observer.observe(&el);
        }
    }
}
