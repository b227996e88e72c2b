//! Canonicalizes a decoded tree before it is merged into a snapshot.
//!
//! - a sequence made only of `[key, value]` pairs with text or numeric keys
//!   becomes a map;
//! - a tensor container map is replaced by its decoded numbers;
//! - everything else is rebuilt with its children normalized.
//!
//! Children are normalized before their parent is inspected, so a pair list
//! or tensor container that only appears once its children are canonical is
//! still caught and normalizing twice gives the same result. Binary views
//! were already flattened to [`Value::Bytes`] when lifting the wire value
//! into [`Value`].

use crate::coerce::as_text;
use crate::tensor::{decode_tensor, is_tensor_container};
use crate::value::{Mapping, Value};

pub fn normalize(value: Value) -> Value {
    match value {
        Value::Seq(items) => {
            let items: Vec<Value> = items.into_iter().map(normalize).collect();
            if is_pair_list(&items) {
                finish_map(pairs_to_map(items))
            } else {
                Value::Seq(items)
            }
        }
        Value::Map(map) => finish_map(map.into_iter().map(|(k, v)| (k, normalize(v))).collect()),
        scalar => scalar,
    }
}

/// `map` has normalized values; a map spelling out a tensor container is
/// replaced by the decoded numbers.
fn finish_map(map: Mapping) -> Value {
    if is_tensor_container(&map) {
        normalize(decode_tensor(&map))
    } else {
        Value::Map(map)
    }
}

fn is_pair_list(items: &[Value]) -> bool {
    !items.is_empty()
        && items.iter().all(|item| match item.as_seq() {
            Some([Value::Text(_), _]) => true,
            Some([Value::Number(n), _]) => n.is_finite(),
            _ => false,
        })
}

fn pairs_to_map(items: Vec<Value>) -> Mapping {
    let mut map = Mapping::with_capacity(items.len());
    for item in items {
        let Value::Seq(pair) = item else { continue };
        let mut pair = pair.into_iter();
        let (Some(key), Some(value)) = (pair.next(), pair.next()) else {
            continue;
        };
        if let Some(key) = as_text(&key) {
            map.insert(key, value);
        }
    }
    map
}
