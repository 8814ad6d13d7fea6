//! Registry of named parameter sets.

use crate::{Error, ObjectIdentifier, Parameters, Result, SEED_SIZE, oid};
use alloc::{boxed::Box, collections::BTreeMap, sync::Arc};
use hex_literal::hex;
use once_cell::race::OnceBox;

/// Parameter sets keyed by object identifier.
///
/// [`ParamStore::standard`] is the process-wide store of the parameter sets
/// defined in STB 34.101.45. It is seeded on first use and read-only
/// afterwards. Private stores built with [`ParamStore::new`] and
/// [`ParamStore::register`] can hold additional or test sets.
///
/// Loaded sets are shared through an [`Arc`], so handing them to concurrent
/// signature operations copies no field elements.
#[derive(Clone, Debug, Default)]
pub struct ParamStore {
    sets: BTreeMap<ObjectIdentifier, Arc<Parameters>>,
}

/// Constants of a standard parameter set, little-endian.
struct StandardSet {
    oid: &'static str,
    l: usize,
    p: &'static [u8],
    a: &'static [u8],
    b: &'static [u8],
    q: &'static [u8],
    y_g: &'static [u8],
    seed: &'static [u8; SEED_SIZE],
}

impl StandardSet {
    fn build(&self) -> Result<Parameters> {
        Parameters::new(self.l, self.p, self.a, self.b, self.q, self.y_g, self.seed)
    }
}

/// `bign-curve256v1` (STB 34.101.45, table B.1).
mod bign_curve256v1 {
    use super::{StandardSet, hex, oid};

    const P: [u8; 32] = hex!("43FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF");
    const A: [u8; 32] = hex!("40FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF");
    const B: [u8; 32] = hex!("F1039CD66B7D2EB253928B976950F54CBEFBD8E4AB3AC1D2EDA8F315156CCE77");
    const Q: [u8; 32] = hex!("07663D2699BF5A7EFC4DFB0DD68E5CD9FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF");
    const Y_G: [u8; 32] = hex!("936A510418CF291E52F608C4663991785D83D651A3C9E45C9FD616FB3CFCF76B");

    pub(super) const SET: StandardSet = StandardSet {
        oid: oid::BIGN_CURVE256V1,
        l: 128,
        p: &P,
        a: &A,
        b: &B,
        q: &Q,
        y_g: &Y_G,
        seed: &hex!("5E38010000000000"),
    };
}

/// `bign-curve384v1` (STB 34.101.45, table B.2).
mod bign_curve384v1 {
    use super::{StandardSet, hex, oid};

    const P: [u8; 48] = hex!(
        "C3FEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
    );
    const A: [u8; 48] = hex!(
        "C0FEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
    );
    const B: [u8; 48] = hex!(
        "64BF736823FCA7BC7CBDCEF3F0E2BD143A2E71E9F96A21A6"
        "96B1FB0FBB482771D2345D65AB5A073320EF9C95E1DF753C"
    );
    const Q: [u8; 48] = hex!(
        "B7A70CF33FDCB73D0AFFA4A6E7DA4680BB7BAF7303C4CC6C"
        "FEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
    );
    const Y_G: [u8; 48] = hex!(
        "51C433F731CB5EEAF9422A6B273E408455D3B1669EE74905"
        "A0FF86DC119A723A89BF2D437E1130639E9E2EA82482435D"
    );

    pub(super) const SET: StandardSet = StandardSet {
        oid: oid::BIGN_CURVE384V1,
        l: 192,
        p: &P,
        a: &A,
        b: &B,
        q: &Q,
        y_g: &Y_G,
        seed: &hex!("23AF000000000000"),
    };
}

/// `bign-curve512v1` (STB 34.101.45, table B.3).
mod bign_curve512v1 {
    use super::{StandardSet, hex, oid};

    const P: [u8; 64] = hex!(
        "C7FDFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
    );
    const A: [u8; 64] = hex!(
        "C4FDFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
    );
    const B: [u8; 64] = hex!(
        "909C13D6986934097AA2493A272286EA43A2AC878C003329955E24C4B5DC1127"
        "88B0ADDAE313CE1751255DDDEEA9C65B8958FD606A5D8CD8438C3B934459B46C"
    );
    const Q: [u8; 64] = hex!(
        "F18E060D49ADFFDC32DF5695E5CA1B36F413212EB0EB6BF24E0098012C09C0B2"
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
    );
    const Y_G: [u8; 64] = hex!(
        "BDEDEFCE6FAE92B7040D4CC9B983AA676122E8EE957377FFD26FFA0EE2DD7369"
        "DACACC001BF8EDD2E2BC61B3B341ABB0AB8FD1A0F7E682B1817603E47AFF26A8"
    );

    pub(super) const SET: StandardSet = StandardSet {
        oid: oid::BIGN_CURVE512V1,
        l: 256,
        p: &P,
        a: &A,
        b: &B,
        q: &Q,
        y_g: &Y_G,
        seed: &hex!("AE17020000000000"),
    };
}

static STANDARD: OnceBox<ParamStore> = OnceBox::new();

impl ParamStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide store of the standard parameter sets.
    pub fn standard() -> &'static ParamStore {
        STANDARD.get_or_init(|| Box::new(Self::seeded()))
    }

    fn seeded() -> Self {
        let mut store = Self::new();
        for set in [
            bign_curve256v1::SET,
            bign_curve384v1::SET,
            bign_curve512v1::SET,
        ] {
            let registered = set
                .build()
                .and_then(|params| store.register(set.oid, params));

            #[cfg(feature = "log")]
            match &registered {
                Ok(()) => log::debug!("seeded standard parameter set {}", set.oid),
                Err(e) => log::error!("standard parameter set {} rejected: {e}", set.oid),
            }
            debug_assert!(
                registered.is_ok(),
                "standard parameter set {} rejected",
                set.oid
            );
        }
        store
    }

    /// Register `params` under the dotted identifier `oid`, replacing any set
    /// already registered there.
    ///
    /// Fails with [`Error::MalformedOid`] if `oid` does not parse.
    ///
    /// The identifier is recorded in the set and reported by
    /// [`Parameters::oid`].
    pub fn register(&mut self, oid: &str, mut params: Parameters) -> Result<()> {
        let oid: ObjectIdentifier = oid.parse()?;
        #[cfg(feature = "log")]
        log::debug!("registering parameter set {oid} (l = {})", params.l());
        params.set_oid(oid.clone());
        self.sets.insert(oid, Arc::new(params));
        Ok(())
    }

    /// Look up the parameter set registered under `oid`.
    ///
    /// Fails with [`Error::MalformedOid`] if `oid` does not parse and with
    /// [`Error::UnknownParameterSet`] if nothing is registered under it.
    pub fn load(&self, oid: &str) -> Result<Arc<Parameters>> {
        let oid: ObjectIdentifier = oid.parse()?;
        match self.sets.get(&oid) {
            Some(params) => Ok(Arc::clone(params)),
            None => {
                #[cfg(feature = "log")]
                log::debug!("no parameter set registered under {oid}");
                Err(Error::UnknownParameterSet)
            }
        }
    }

    /// Whether a set is registered under `oid`.
    pub fn contains(&self, oid: &ObjectIdentifier) -> bool {
        self.sets.contains_key(oid)
    }

    /// Identifiers of all registered sets, in ascending order.
    pub fn oids(&self) -> impl Iterator<Item = &ObjectIdentifier> {
        self.sets.keys()
    }

    /// Number of registered sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// Load a parameter set from [`ParamStore::standard`].
pub fn load_standard(oid: &str) -> Result<Arc<Parameters>> {
    ParamStore::standard().load(oid)
}

#[cfg(test)]
mod tests {
    use super::{ParamStore, bign_curve256v1, bign_curve384v1, bign_curve512v1, load_standard};
    use crate::{Error, Parameters, oid, to_hex};
    use alloc::{string::ToString, sync::Arc, vec::Vec};

    fn curve256v1() -> Parameters {
        bign_curve256v1::SET.build().unwrap()
    }

    #[test]
    fn standard_set_is_valid() {
        let params = load_standard(oid::BIGN_CURVE256V1).unwrap();
        assert_eq!(params.l(), 128);
        assert_eq!(
            to_hex(params.q()),
            "07663D2699BF5A7EFC4DFB0DD68E5CD9FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
        );
        assert_eq!(*params, curve256v1());
    }

    #[test]
    fn every_standard_set_is_seeded() {
        let store = ParamStore::standard();
        assert_eq!(store.len(), 3);
        assert_eq!(
            store.oids().map(ToString::to_string).collect::<Vec<_>>(),
            [
                oid::BIGN_CURVE256V1,
                oid::BIGN_CURVE384V1,
                oid::BIGN_CURVE512V1
            ]
        );

        for set in [
            bign_curve256v1::SET,
            bign_curve384v1::SET,
            bign_curve512v1::SET,
        ] {
            let params = load_standard(set.oid).unwrap();
            assert_eq!(params.l(), set.l);
            assert_eq!(*params, set.build().unwrap());
            assert_eq!(params.oid().map(ToString::to_string).as_deref(), Some(set.oid));
            assert_eq!(params.cofactor(), 1);
        }
    }

    #[test]
    fn loads_share_one_instance() {
        let first = load_standard(oid::BIGN_CURVE256V1).unwrap();
        let second = load_standard(oid::BIGN_CURVE256V1).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn unknown_and_malformed() {
        assert_eq!(
            load_standard("1.2.112.0.2.0.34.101.45.3.4").unwrap_err(),
            Error::UnknownParameterSet
        );
        assert_eq!(
            load_standard(oid::BELT_HASH).unwrap_err(),
            Error::UnknownParameterSet
        );
        assert_eq!(load_standard("1.2.x").unwrap_err(), Error::MalformedOid);
        assert_eq!(load_standard("").unwrap_err(), Error::MalformedOid);
    }

    #[test]
    fn private_store() {
        let mut store = ParamStore::new();
        assert!(store.is_empty());
        let params = curve256v1();
        assert_eq!(params.oid(), None);
        store.register("1.3.6.1.4.1.99999.1", params).unwrap();
        assert_eq!(store.len(), 1);
        let loaded = store.load("1.3.6.1.4.1.99999.1").unwrap();
        assert_eq!(loaded.l(), 128);
        assert_eq!(loaded.oid(), Some(&"1.3.6.1.4.1.99999.1".parse().unwrap()));
        assert_eq!(
            store.load(oid::BIGN_CURVE256V1).unwrap_err(),
            Error::UnknownParameterSet
        );
        assert_eq!(
            store.register("1..2", curve256v1()).unwrap_err(),
            Error::MalformedOid
        );
        assert!(!ParamStore::standard().contains(&"1.3.6.1.4.1.99999.1".parse().unwrap()));
    }
}
