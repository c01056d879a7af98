//! Response signal decoding.
//!
//! The portal answers with `(u code, a{sv} results)`. The dictionary is read
//! through a runtime handler table so unknown keys from newer portal
//! versions are skipped instead of breaking the decode, while any structural
//! deviation inside a consulted value aborts the whole call.

use std::collections::HashMap;

use zbus::zvariant::Value;

use crate::constants::{RESPONSE_CANCELLED, RESPONSE_SELECTED};
use crate::error::{Error, Result};

/// Decoded dialog outcome, still in URI form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DialogResponse {
    /// The user selected a file; the first returned URI, verbatim.
    Selected(String),
    /// The user dismissed the dialog.
    Cancelled,
}

/// One entry of the dictionary handler table.
pub(crate) struct DictField<'h, 'v> {
    /// Key this handler consumes.
    pub key: &'static str,
    /// Runs on the variant-unwrapped value; an error aborts the decode.
    pub read: &'h mut dyn FnMut(&Value<'v>) -> Result<()>,
}

/// Dispatch each dictionary entry to the matching handler.
///
/// Entries without a registered handler are skipped (forward compatible);
/// the first handler error aborts with no partial result.
pub(crate) fn read_dict<'v>(
    entries: &HashMap<String, Value<'v>>,
    fields: &mut [DictField<'_, 'v>],
) -> Result<()> {
    for (key, value) in entries {
        if let Some(field) = fields.iter_mut().find(|f| f.key == key.as_str()) {
            (field.read)(value)?;
        }
    }
    Ok(())
}

/// Read the top-level response: result code plus results dictionary.
///
/// Code 0 extracts the first `uris` entry, code 1 is cancellation, anything
/// else means the interaction ended abnormally. A selected response without
/// a usable URI is a decode failure, not a reason to keep waiting.
pub(crate) fn read_response(
    code: u32,
    results: &HashMap<String, Value<'_>>,
) -> Result<DialogResponse> {
    match code {
        RESPONSE_SELECTED => {}
        RESPONSE_CANCELLED => return Ok(DialogResponse::Cancelled),
        code => return Err(Error::Aborted { code }),
    }

    let mut uri: Option<String> = None;
    {
        let mut read_uris = |value: &Value<'_>| -> Result<()> {
            let Value::Array(items) = value else {
                return Err(Error::decode("response 'uris' entry is not an array"));
            };
            match items.iter().next() {
                Some(Value::Str(first)) => {
                    uri = Some(first.as_str().to_owned());
                    Ok(())
                }
                Some(_) => Err(Error::decode(
                    "response 'uris' entry is not an array of strings",
                )),
                None => Ok(()),
            }
        };
        let mut fields = [DictField {
            key: "uris",
            read: &mut read_uris,
        }];
        read_dict(results, &mut fields)?;
    }

    match uri {
        Some(uri) => Ok(DialogResponse::Selected(uri)),
        None => Err(Error::decode("selected response carried no file URI")),
    }
}
