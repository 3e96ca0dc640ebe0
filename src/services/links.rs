// src/services/links.rs
use std::collections::HashMap;

use crate::error::SiteError;
use crate::models::{Chain, LinkEntry, LinkGroup, LinkKind, PLACEHOLDER_VALUE};

pub const SOL_MINT: &str = "82gi7mybA1yHi56FcCC9wvTPzew5hsxP2wdHv4nYpump";
pub const BSC_CONTRACT: &str = "0x4f0b6d521e3929b240e265fac2155d4341abede7";
pub const GENESIS_CANDY_MACHINE: &str = "8gV7rDrGQxEdMAo7BKMmpzXSJcuurAkgkAP61diwaQMy";
pub const GENESIS_COLLECTION_MINT: &str = "FtVV4c2mHekreCHyVyEfq3MbCnFYa4xuohPv5ppJXuPS";

/// Read-only table of official URLs and on-chain addresses.
#[derive(Debug, Clone)]
pub struct LinkRegistry {
    entries: Vec<LinkEntry>,
    index: HashMap<&'static str, usize>,
}

impl LinkRegistry {
    pub fn new(entries: Vec<LinkEntry>) -> Result<Self, SiteError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (pos, entry) in entries.iter().enumerate() {
            if index.insert(entry.id, pos).is_some() {
                return Err(SiteError::DuplicateLink(entry.id.to_string()));
            }
        }
        Ok(Self { entries, index })
    }

    /// The compiled-in verification-center table. `hub_base_url` is the
    /// already normalized mission hub URL from configuration.
    pub fn official(hub_base_url: &str) -> Result<Self, SiteError> {
        Self::new(vec![
            // Official channels
            LinkEntry::url("website", "Website", LinkGroup::Official, "https://www.weareoneconnection.org"),
            LinkEntry::url("x", "X / Twitter", LinkGroup::Official, "https://x.com/waoconnectone?s=21"),
            LinkEntry::url("telegram", "Telegram", LinkGroup::Official, "https://t.me/WAOCGlobalCommunity"),
            // Mission systems
            LinkEntry::url("oneMission", "One Mission", LinkGroup::Missions, hub_base_url),
            LinkEntry::url(
                "oneMissionUniversal",
                "One Mission Universal",
                LinkGroup::Missions,
                "https://one-mission-universal.vercel.app",
            ),
            LinkEntry::url("oneField", "One Field", LinkGroup::Missions, "https://one-field.vercel.app/"),
            // Products
            LinkEntry::url(
                "meditation",
                "Meditation App",
                LinkGroup::Products,
                "https://waoc-meditation-mvp-test.vercel.app/",
            ),
            LinkEntry::url("mint", "Genesis Mint", LinkGroup::Products, "https://waoc-genesis-mint.vercel.app/"),
            LinkEntry::url(
                "whitepaper",
                "Whitepaper (PDF)",
                LinkGroup::Products,
                "/static/whitepaper/WAOC_Whitepaper_v1.pdf",
            ),
            // Markets
            LinkEntry::url(
                "dexscreener",
                "DexScreener",
                LinkGroup::Markets,
                "https://dexscreener.com/solana/3mJvSq4KG51KfsCZCafsHfHjFs5st361a55ipYDERdW9",
            ),
            LinkEntry::url(
                "buySol",
                "Buy on Solana",
                LinkGroup::Markets,
                format!(
                    "https://swap.pump.fun?input=So11111111111111111111111111111111111111112&output={}",
                    SOL_MINT
                ),
            ),
            LinkEntry::url(
                "buyBsc",
                "Buy on BSC",
                LinkGroup::Markets,
                format!("https://pancakeswap.finance/swap?outputCurrency={}", BSC_CONTRACT),
            ),
            // On-chain
            LinkEntry::address("solMint", "Token Mint", Chain::Solana, SOL_MINT),
            LinkEntry::address("genesisCandyMachine", "Genesis Candy Machine", Chain::Solana, GENESIS_CANDY_MACHINE),
            LinkEntry::address(
                "genesisCollectionMint",
                "Genesis Collection Mint",
                Chain::Solana,
                GENESIS_COLLECTION_MINT,
            ),
            LinkEntry::address("bscContract", "Token Contract (CA)", Chain::Bsc, BSC_CONTRACT),
            LinkEntry::url("bscDex", "DEX", LinkGroup::Bsc, PLACEHOLDER_VALUE),
        ])
    }

    pub fn get(&self, id: &str) -> Result<&LinkEntry, SiteError> {
        self.index
            .get(id)
            .map(|&pos| &self.entries[pos])
            .ok_or_else(|| SiteError::UnknownLink(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn explorer_url(&self, id: &str) -> Result<String, SiteError> {
        let entry = self.get(id)?;
        if entry.kind != LinkKind::Address {
            return Err(SiteError::NotAnAddress(id.to_string()));
        }
        entry
            .explorer_url()
            .ok_or_else(|| SiteError::NotAnAddress(id.to_string()))
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &LinkEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> LinkRegistry {
        LinkRegistry::official("https://one-mission.vercel.app").unwrap()
    }

    #[test]
    fn test_lookup_known_and_unknown() {
        let links = registry();
        assert_eq!(links.get("telegram").unwrap().value, "https://t.me/WAOCGlobalCommunity");
        assert_eq!(
            links.get("discord"),
            Err(SiteError::UnknownLink("discord".to_string()))
        );
    }

    #[test]
    fn test_explorer_url_determinism() {
        let links = registry();
        assert_eq!(
            links.explorer_url("solMint").unwrap(),
            "https://solscan.io/token/82gi7mybA1yHi56FcCC9wvTPzew5hsxP2wdHv4nYpump"
        );
        assert_eq!(
            links.explorer_url("bscContract").unwrap(),
            "https://bscscan.com/address/0x4f0b6d521e3929b240e265fac2155d4341abede7"
        );
        // Same input, same output.
        assert_eq!(links.explorer_url("solMint"), links.explorer_url("solMint"));
    }

    #[test]
    fn test_explorer_url_rejects_plain_urls() {
        let links = registry();
        assert_eq!(
            links.explorer_url("website"),
            Err(SiteError::NotAnAddress("website".to_string()))
        );
        assert_eq!(
            links.explorer_url("nope"),
            Err(SiteError::UnknownLink("nope".to_string()))
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = LinkRegistry::new(vec![
            LinkEntry::url("x", "X", LinkGroup::Official, "https://x.com/a"),
            LinkEntry::url("x", "X", LinkGroup::Official, "https://x.com/b"),
        ]);
        assert_eq!(result.unwrap_err(), SiteError::DuplicateLink("x".to_string()));
    }

    #[test]
    fn test_hub_url_comes_from_configuration() {
        let links = LinkRegistry::official("https://missions.example.org").unwrap();
        assert_eq!(links.get("oneMission").unwrap().value, "https://missions.example.org");
    }

    #[test]
    fn test_bsc_dex_is_placeholder() {
        let links = registry();
        let dex = links.get("bscDex").unwrap();
        assert!(dex.is_placeholder());
        assert_eq!(dex.href(), None);
    }

    #[test]
    fn test_iteration_order_is_registration_order() {
        let links = registry();
        let ids: Vec<_> = links.iter().map(|e| e.id).take(3).collect();
        assert_eq!(ids, vec!["website", "x", "telegram"]);
        assert_eq!(links.len(), links.iter().count());
    }
}
