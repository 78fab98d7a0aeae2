//! Contact form wiring: consent gate, HTML5 validation, honeypot and the
//! JSON post to the mail relay.

use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, FormData, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

use super::{listen, query_as};
use crate::contact::{
    ContactPayload, ENDPOINT_FIELD, FAILURE_TEXT, HONEYPOT_FIELD, INVALID_TEXT, LEAD_EVENT, SERVICE_FIELD,
    SUCCESS_TEXT, FormFields, Submission, SubmitError, check_status, lead_event, message_prefix, prefill_message,
    prepare,
};

const DEFAULT_FORM_ID: &str = "contacto";

struct ContactForm {
    form: HtmlFormElement,
    consent: Option<HtmlInputElement>,
    send: Option<HtmlButtonElement>,
    feedback: Option<HtmlElement>,
    service_field: Option<HtmlInputElement>,
    message: Option<HtmlTextAreaElement>,
    /// `?service=` of the page URL, empty when absent.
    query_service: String,
}

impl ContactForm {
    fn sync_send_button(&self) {
        if let (Some(send), Some(consent)) = (&self.send, &self.consent) {
            send.set_disabled(!consent.checked());
        }
    }

    fn prefill(&self) {
        if let Some(field) = &self.service_field {
            if field.value().is_empty() {
                field.set_value(&self.query_service);
            }
        }
        if let Some(message) = &self.message {
            if let Some(text) = prefill_message(&message.value(), Some(&self.query_service)) {
                message.set_value(&text);
            }
        }
    }

    fn hide_feedback(&self) {
        if let Some(fb) = &self.feedback {
            fb.set_class_name("");
            set_display(fb, "none");
        }
    }

    fn show_feedback(&self, text: &str, class: &str) {
        if let Some(fb) = &self.feedback {
            fb.set_text_content(Some(text));
            fb.set_class_name(class);
            set_display(fb, "block");
        }
    }

    fn fields(&self) -> Option<FormFields> {
        let data = match FormData::new_with_form(&self.form) {
            Ok(data) => data,
            Err(err) => {
                log::warn!("contact: form data: {err:?}");
                return None;
            }
        };
        let get = |name: &str| data.get(name).as_string().unwrap_or_default();
        Some(FormFields {
            name: get("name"),
            email: get("email"),
            phone: get("phone"),
            company: get("company"),
            message: get("message"),
            service: get(SERVICE_FIELD),
            honeypot: get(HONEYPOT_FIELD),
            endpoint: get(ENDPOINT_FIELD),
        })
    }

    fn on_sent(&self, service: &str) {
        self.show_feedback(SUCCESS_TEXT, "success");
        self.form.reset();
        self.sync_send_button();
        if let (Some(message), Some(prefix)) = (&self.message, message_prefix(&self.query_service)) {
            message.set_value(&prefix);
        }
        if let Some(field) = &self.service_field {
            field.set_value(&self.query_service);
        }

        let form_id = match self.form.id() {
            id if id.is_empty() => DEFAULT_FORM_ID.to_owned(),
            id => id,
        };
        report_lead(&form_id, service);
    }
}

fn set_display(el: &HtmlElement, value: &str) {
    if let Err(err) = el.style().set_property("display", value) {
        log::warn!("contact: feedback display: {err:?}");
    }
}

pub(super) fn install(document: &Document) {
    let Some(form) = query_as::<HtmlFormElement>(document, "#contact-form") else {
        return;
    };
    let query_service = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok())
        .and_then(|params| params.get("service"))
        .unwrap_or_default();

    let contact = Rc::new(ContactForm {
        form,
        consent: query_as(document, "#rgpd"),
        send: query_as(document, "#sendBtn"),
        feedback: query_as(document, "#contact-feedback"),
        service_field: query_as(document, "#serviceField"),
        message: query_as(document, "#message"),
        query_service,
    });
    contact.prefill();
    contact.sync_send_button();

    if let Some(consent) = &contact.consent {
        let contact = Rc::clone(&contact);
        listen(consent, "change", move |_| contact.sync_send_button());
    }

    let form = contact.form.clone();
    listen(&form, "submit", move |event| {
        event.prevent_default();
        submit(&contact);
    });
}

fn submit(contact: &Rc<ContactForm>) {
    if let Err(err) = contact.form.class_list().add_1("was-validated") {
        log::warn!("contact: mark validated: {err:?}");
    }
    contact.hide_feedback();

    if !contact.form.check_validity() {
        contact.show_feedback(INVALID_TEXT, "error");
        return;
    }
    let Some(fields) = contact.fields() else {
        contact.show_feedback(FAILURE_TEXT, "error");
        return;
    };

    let (endpoint, payload) = match prepare(&fields, Some(&contact.query_service)) {
        Submission::Spam => {
            log::debug!("contact: honeypot filled, dropped");
            return;
        }
        Submission::Send { endpoint, payload } => (endpoint, payload),
    };

    let contact = Rc::clone(contact);
    wasm_bindgen_futures::spawn_local(async move {
        match post(&endpoint, &payload).await {
            Ok(()) => contact.on_sent(&payload.service),
            Err(err) => {
                log::warn!("contact: submit failed: {err}");
                contact.show_feedback(FAILURE_TEXT, "error");
            }
        }
    });
}

async fn post(endpoint: &str, payload: &ContactPayload) -> Result<(), SubmitError> {
    let resp = gloo_net::http::Request::post(endpoint)
        .json(payload)
        .map_err(|e| SubmitError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| SubmitError::Network(e.to_string()))?;
    check_status(resp.status())
}

/// Send `lead_submit` to Google Analytics when `gtag` is on the page.
fn report_lead(form_id: &str, service: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(gtag) = js_sys::Reflect::get(&window, &JsValue::from_str("gtag"))
        .ok()
        .and_then(|value| value.dyn_into::<js_sys::Function>().ok())
    else {
        return;
    };
    let params = match js_sys::JSON::parse(&lead_event(form_id, service).to_string()) {
        Ok(params) => params,
        Err(err) => {
            log::warn!("contact: analytics params: {err:?}");
            return;
        }
    };
    if let Err(err) = gtag.call3(&JsValue::NULL, &JsValue::from_str("event"), &JsValue::from_str(LEAD_EVENT), &params) {
        log::warn!("contact: gtag: {err:?}");
    }
}
