//! Parameter validation tests

use bign::{Error, ParamStore, Parameters, SEED_SIZE, load_standard, oid, to_hex};

struct Raw {
    l: usize,
    p: Vec<u8>,
    a: Vec<u8>,
    b: Vec<u8>,
    q: Vec<u8>,
    y_g: Vec<u8>,
    seed: Vec<u8>,
}

impl Raw {
    fn standard() -> Self {
        let params = load_standard(oid::BIGN_CURVE256V1).unwrap();
        Self {
            l: params.l(),
            p: params.p().to_vec(),
            a: params.a().to_vec(),
            b: params.b().to_vec(),
            q: params.q().to_vec(),
            y_g: params.y_g().to_vec(),
            seed: params.seed().to_vec(),
        }
    }

    fn build(&self) -> bign::Result<Parameters> {
        Parameters::new(
            self.l, &self.p, &self.a, &self.b, &self.q, &self.y_g, &self.seed,
        )
    }
}

#[test]
fn standard_set() {
    let params = load_standard(oid::BIGN_CURVE256V1).unwrap();
    assert_eq!(params.l(), 128);
    assert_eq!(params.field_size(), 32);
    assert_eq!(params.public_key_size(), 64);
    assert_eq!(params.signature_size(), 48);
    assert_eq!(
        to_hex(params.p()),
        "43FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
    );
    assert_eq!(
        to_hex(params.q()),
        "07663D2699BF5A7EFC4DFB0DD68E5CD9FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
    );
    assert_eq!(params.seed().len(), SEED_SIZE);
    assert_eq!(*params, Raw::standard().build().unwrap());
}

#[test]
fn curve384v1() {
    let params = load_standard(oid::BIGN_CURVE384V1).unwrap();
    assert_eq!(params.l(), 192);
    assert_eq!(params.field_size(), 48);
    assert_eq!(params.public_key_size(), 96);
    assert_eq!(params.signature_size(), 72);
    assert_eq!(
        to_hex(params.p()),
        "C3FEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF\
         FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
    );
    assert_eq!(
        to_hex(params.q()),
        "B7A70CF33FDCB73D0AFFA4A6E7DA4680BB7BAF7303C4CC6C\
         FEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
    );
    assert_eq!(to_hex(params.seed()), "23AF000000000000");
}

#[test]
fn curve512v1() {
    let params = load_standard(oid::BIGN_CURVE512V1).unwrap();
    assert_eq!(params.l(), 256);
    assert_eq!(params.field_size(), 64);
    assert_eq!(params.public_key_size(), 128);
    assert_eq!(params.signature_size(), 96);
    assert_eq!(
        to_hex(params.p()),
        "C7FDFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF\
         FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
    );
    assert_eq!(
        to_hex(params.q()),
        "F18E060D49ADFFDC32DF5695E5CA1B36F413212EB0EB6BF24E0098012C09C0B2\
         FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
    );
    assert_eq!(to_hex(params.seed()), "AE17020000000000");
}

#[test]
fn identifier_and_cofactor() {
    for name in [
        oid::BIGN_CURVE256V1,
        oid::BIGN_CURVE384V1,
        oid::BIGN_CURVE512V1,
    ] {
        let params = load_standard(name).unwrap();
        assert_eq!(params.oid(), Some(&name.parse().unwrap()));
        assert_eq!(params.cofactor(), 1);
    }

    let params = Raw::standard().build().unwrap();
    assert_eq!(params.oid(), None);
    assert_eq!(params.cofactor(), 1);
}

#[test]
fn rejects_bad_level() {
    let mut raw = Raw::standard();
    raw.l = 100;
    assert_eq!(raw.build().unwrap_err(), Error::InvalidParameters);

    raw.l = 192;
    assert_eq!(raw.build().unwrap_err(), Error::SizeMismatch);
}

#[test]
fn rejects_bad_sizes() {
    let mut raw = Raw::standard();
    raw.p.push(0);
    assert_eq!(raw.build().unwrap_err(), Error::SizeMismatch);

    let mut raw = Raw::standard();
    raw.y_g.pop();
    assert_eq!(raw.build().unwrap_err(), Error::SizeMismatch);

    let mut raw = Raw::standard();
    raw.seed.push(0);
    assert_eq!(raw.build().unwrap_err(), Error::SizeMismatch);
}

#[test]
fn rejects_bad_modulus() {
    // Even.
    let mut raw = Raw::standard();
    raw.p[0] ^= 1;
    assert_eq!(raw.build().unwrap_err(), Error::InvalidParameters);

    // p ≡ 1 (mod 4).
    let mut raw = Raw::standard();
    raw.p[0] = 0x41;
    assert_eq!(raw.build().unwrap_err(), Error::InvalidParameters);

    // Too short: top bit clear.
    let mut raw = Raw::standard();
    raw.p[31] = 0x7F;
    assert_eq!(raw.build().unwrap_err(), Error::InvalidParameters);
}

#[test]
fn rejects_bad_coefficients() {
    let mut raw = Raw::standard();
    raw.a = raw.p.clone();
    assert_eq!(raw.build().unwrap_err(), Error::InvalidParameters);

    let mut raw = Raw::standard();
    raw.b = vec![0; 32];
    assert_eq!(raw.build().unwrap_err(), Error::InvalidParameters);

    // G no longer on the curve.
    let mut raw = Raw::standard();
    raw.b[0] ^= 1;
    assert_eq!(raw.build().unwrap_err(), Error::InvalidParameters);
}

#[test]
fn rejects_bad_generator() {
    let mut raw = Raw::standard();
    raw.y_g[0] ^= 1;
    assert_eq!(raw.build().unwrap_err(), Error::InvalidParameters);

    let mut raw = Raw::standard();
    raw.y_g = raw.p.clone();
    assert_eq!(raw.build().unwrap_err(), Error::InvalidParameters);
}

#[test]
fn rejects_bad_order() {
    // Still odd, but qG ≠ O.
    let mut raw = Raw::standard();
    raw.q[0] ^= 2;
    assert_eq!(raw.build().unwrap_err(), Error::InvalidParameters);

    let mut raw = Raw::standard();
    raw.q[0] ^= 1;
    assert_eq!(raw.build().unwrap_err(), Error::InvalidParameters);

    let mut raw = Raw::standard();
    raw.q = raw.p.clone();
    assert_eq!(raw.build().unwrap_err(), Error::InvalidParameters);
}

#[test]
fn custom_store() {
    const TEST_OID: &str = "1.3.6.1.4.1.99999.7";

    let mut store = ParamStore::new();
    store.register(TEST_OID, Raw::standard().build().unwrap()).unwrap();
    assert!(store.contains(&TEST_OID.parse().unwrap()));
    assert_eq!(store.oids().map(ToString::to_string).collect::<Vec<_>>(), [TEST_OID]);
    assert_eq!(
        store.load(oid::BIGN_CURVE256V1).unwrap_err(),
        Error::UnknownParameterSet
    );
    assert_eq!(store.load("1.3.6.1.4.1.99999.07").unwrap_err(), Error::MalformedOid);

    let params = store.load(TEST_OID).unwrap();
    assert_eq!(*params, *load_standard(oid::BIGN_CURVE256V1).unwrap());
    assert_eq!(params.oid(), Some(&TEST_OID.parse().unwrap()));
}
