use std::collections::HashMap;

use erltf::{Config, Encoder, Term};

#[test]
fn conformance_true() {
	assert_eq!(
		erltf::to_vec(&true).unwrap(),
		[131, 119, 4, b't', b'r', b'u', b'e']
	);
	assert_eq!(
		erltf::term_to_vec(&Term::Bool(true)).unwrap(),
		[131, 119, 4, b't', b'r', b'u', b'e']
	);
}

#[test]
fn conformance_nil() {
	assert_eq!(
		erltf::to_vec(&None::<String>).unwrap(),
		[131, 119, 3, b'n', b'i', b'l']
	);
	assert_eq!(
		erltf::term_to_vec(&Term::Nil).unwrap(),
		[131, 119, 3, b'n', b'i', b'l']
	);
}

#[test]
fn conformance_small_integer() {
	assert_eq!(erltf::to_vec(&200_u8).unwrap(), [131, 97, 200]);
	assert_eq!(
		erltf::term_to_vec(&Term::from(200_u8)).unwrap(),
		[131, 97, 200]
	);
}

#[test]
fn conformance_empty_list() {
	assert_eq!(
		erltf::to_vec(&Vec::<u8>::new()).unwrap(),
		[131, 108, 0, 0, 0, 0, 106]
	);
	assert_eq!(
		erltf::to_vec(&()).unwrap(),
		[131, 119, 3, b'n', b'i', b'l'],
		"unit is nil, not an empty list"
	);
}

#[test]
fn conformance_float() {
	assert_eq!(
		erltf::to_vec(&1.5_f64).unwrap(),
		[131, 70, 0x3f, 0xf8, 0, 0, 0, 0, 0, 0]
	);
}

#[test]
fn conformance_string() {
	let config = Config::default().with_force_binary_strings(false);

	assert_eq!(
		erltf::to_vec_with_config("abc", config).unwrap(),
		[131, 107, 3, 0, b'a', b'b', b'c']
	);
	assert_eq!(
		erltf::to_vec("abc").unwrap(),
		[131, 109, 0, 0, 0, 3, b'a', b'b', b'c']
	);
}

#[test]
fn conformance_legacy_integer() {
	assert_eq!(
		erltf::term_to_vec(&Term::FixedInt(1 << 16)).unwrap(),
		[131, 98, 0, 1, 0, 0]
	);
}

#[test]
fn conformance_payload() {
	let mut d = HashMap::new();
	d.insert("heartbeat_interval", Term::from(41250_u32));

	let payload = Term::map([
		("op", Term::from(10_u8)),
		("d", Term::from(d)),
		("s", Term::Nil),
	]);

	let mut expected = vec![131, 116, 0, 0, 0, 3];
	expected.extend([109, 0, 0, 0, 2, b'o', b'p', 97, 10]);
	expected.extend([109, 0, 0, 0, 1, b'd', 116, 0, 0, 0, 1]);
	expected.extend([109, 0, 0, 0, 18]);
	expected.extend(b"heartbeat_interval");
	expected.extend([110, 2, 0, 0x22, 0xa1]);
	expected.extend([109, 0, 0, 0, 1, b's', 119, 3, b'n', b'i', b'l']);

	assert_eq!(erltf::term_to_vec(&payload).unwrap(), expected);
}

#[test]
fn conformance_version_byte_once() {
	let mut encoder = Encoder::new().unwrap();
	encoder.encode(&1_u8).unwrap();
	encoder.encode(&2_u8).unwrap();

	assert_eq!(encoder.as_bytes(), [131, 97, 1, 97, 2]);
}
