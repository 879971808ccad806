use std::collections::BTreeMap;

use serde::Serialize;

use erltf::{AsBinary, Config, Encoder, Error, Unsupported};

/// Splits the pairs of a top-level map whose keys are binaries and values
/// are small integers or nil.
fn pairs(bytes: &[u8]) -> Vec<(String, Option<u8>)> {
	assert_eq!(bytes[..2], [131, 116]);
	let count = u32::from_be_bytes(bytes[2..6].try_into().unwrap());

	let mut out = Vec::new();
	let mut rest = &bytes[6..];
	for _ in 0..count {
		assert_eq!(rest[0], 109, "keys are binaries");
		let len = u32::from_be_bytes(rest[1..5].try_into().unwrap()) as usize;
		let key = String::from_utf8(rest[5..5 + len].to_vec()).unwrap();
		rest = &rest[5 + len..];

		let value = match rest[0] {
			97 => {
				let x = rest[1];
				rest = &rest[2..];
				Some(x)
			},
			119 => {
				assert_eq!(rest[..5], [119, 3, b'n', b'i', b'l']);
				rest = &rest[5..];
				None
			},
			tag => panic!("unexpected tag {tag}"),
		};

		out.push((key, value));
	}

	assert!(rest.is_empty(), "trailing bytes after map");
	out
}

#[test]
fn test_record_keys_and_order() {
	#[derive(Serialize)]
	#[serde(rename_all = "camelCase")]
	struct Ready {
		session_version: u8,
		#[serde(rename = "v")]
		gateway_version: u8,
		#[serde(skip)]
		_internal: u8,
		resume_seq: Option<u8>,
		#[serde(skip_serializing_if = "Option::is_none")]
		shard: Option<u8>,
	}

	let bytes = erltf::to_vec(&Ready {
		session_version: 1,
		gateway_version: 9,
		_internal: 7,
		resume_seq: None,
		shard: None,
	})
	.unwrap();

	assert_eq!(
		pairs(&bytes),
		[
			("sessionVersion".to_owned(), Some(1)),
			("v".to_owned(), Some(9)),
			("resumeSeq".to_owned(), None),
		]
	);

	let bytes = erltf::to_vec(&Ready {
		session_version: 1,
		gateway_version: 9,
		_internal: 7,
		resume_seq: Some(3),
		shard: Some(0),
	})
	.unwrap();

	assert_eq!(
		pairs(&bytes),
		[
			("sessionVersion".to_owned(), Some(1)),
			("v".to_owned(), Some(9)),
			("resumeSeq".to_owned(), Some(3)),
			("shard".to_owned(), Some(0)),
		]
	);
}

#[test]
fn test_map_pairs_match_entries() {
	let mut map = BTreeMap::new();
	for (i, key) in ["zeta", "alpha", "mid", "omega"].into_iter().enumerate() {
		map.insert(key.to_owned(), i as u8);
	}

	let got = pairs(&erltf::to_vec(&map).unwrap());
	assert_eq!(got.len(), map.len());

	for (key, value) in got {
		assert_eq!(map.get(&key).copied(), value, "{key}");
	}
}

#[test]
fn test_nested_records() {
	#[derive(Serialize)]
	struct Inner {
		x: u8,
	}

	#[derive(Serialize)]
	struct Outer {
		inner: Inner,
		list: Vec<Inner>,
	}

	let bytes = erltf::to_vec(&Outer {
		inner: Inner { x: 1 },
		list: vec![Inner { x: 2 }],
	})
	.unwrap();

	let inner_x = |x: u8| {
		let mut v = vec![116, 0, 0, 0, 1, 109, 0, 0, 0, 1, b'x', 97];
		v.push(x);
		v
	};

	let mut expected = vec![131, 116, 0, 0, 0, 2];
	expected.extend([109, 0, 0, 0, 5]);
	expected.extend(b"inner");
	expected.extend(inner_x(1));
	expected.extend([109, 0, 0, 0, 4]);
	expected.extend(b"list");
	expected.extend([108, 0, 0, 0, 1]);
	expected.extend(inner_x(2));
	expected.push(106);

	assert_eq!(bytes, expected);
}

#[test]
fn test_binary_fields() {
	#[derive(Serialize)]
	struct Upload {
		name: String,
		data: AsBinary<Vec<u8>>,
	}

	let config = Config::default().with_force_binary_strings(false);
	let bytes = erltf::to_vec_with_config(
		&Upload { name: "a".into(), data: AsBinary(vec![0xff]) },
		config,
	)
	.unwrap();

	let mut expected = vec![131, 116, 0, 0, 0, 2];
	expected.extend([107, 4, 0]);
	expected.extend(b"name");
	expected.extend([107, 1, 0, b'a']);
	expected.extend([107, 4, 0]);
	expected.extend(b"data");
	expected.extend([109, 0, 0, 0, 1, 0xff]);

	assert_eq!(bytes, expected);
}

#[test]
fn test_non_text_keys_are_rejected() {
	let mut map = BTreeMap::new();
	map.insert(vec![1_u8], true);

	let mut encoder = Encoder::new().unwrap();
	let err = encoder.encode(&map).unwrap_err();

	assert_eq!(err, Error::Unsupported(Unsupported::NonTextKey));
	assert!(err.is_contract_violation(), "{err}");
	assert_eq!(encoder.as_bytes(), [131], "the map must be removed");
}

#[test]
fn test_non_finite_floats_are_rejected() {
	for x in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
		let err = erltf::to_vec(&x).unwrap_err();
		assert_eq!(err, Error::Unsupported(Unsupported::NonFiniteFloat));
	}

	let err = erltf::to_vec(&f32::NAN).unwrap_err();
	assert!(err.is_contract_violation(), "{err}");
}

#[test]
fn test_failed_encode_in_transaction() {
	#[derive(Serialize)]
	struct Reading {
		value: f64,
	}

	let mut encoder = Encoder::new().unwrap();
	encoder.encode(&Reading { value: 1.0 }).unwrap();
	let good = encoder.as_bytes().to_vec();

	let mut tx = encoder.transaction();
	tx.encode(&Reading { value: f64::NAN }).unwrap_err();
	drop(tx);

	assert_eq!(encoder.as_bytes(), good);
}
