//! Image file reading for admin uploads

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

fn js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

/// Read a picked file as a `data:` URL
pub async fn read_data_url(file: web_sys::File) -> Result<String, String> {
    if !file.type_().starts_with("image/") {
        return Err(format!("{} is not an image", file.name()));
    }

    let reader = web_sys::FileReader::new().map_err(js_error)?;
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let done = reader.clone();
        let onload = Closure::once_into_js(move || {
            let result = done.result().unwrap_or(JsValue::NULL);
            let _ = resolve.call1(&JsValue::NULL, &result);
        });
        let onerror = Closure::once_into_js(move || {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("could not read file"));
        });
        reader.set_onload(Some(onload.unchecked_ref()));
        reader.set_onerror(Some(onerror.unchecked_ref()));
    });

    reader.read_as_data_url(&file).map_err(js_error)?;
    let value = JsFuture::from(promise).await.map_err(js_error)?;
    value.as_string().ok_or_else(|| "file reader returned no data".to_string())
}

/// First file of an `<input type="file">` change event
pub fn picked_file(ev: &web_sys::Event) -> Option<web_sys::File> {
    let input = ev.target()?.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    input.files()?.get(0)
}
