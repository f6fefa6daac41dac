use web_sys as web;

use crate::constants::NOTICE_ID;

/// Show a one-line message in the notice banner.
pub fn show_notice(document: &web::Document, message: &str) {
    if let Some(el) = document.get_element_by_id(NOTICE_ID) {
        el.set_text_content(Some(message));
        _ = el.class_list().remove_1("hidden");
        _ = el.set_attribute("style", "");
    }
}

pub fn hide_notice(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(NOTICE_ID) {
        _ = el.class_list().add_1("hidden");
        _ = el.set_attribute("style", "display:none");
    }
}
