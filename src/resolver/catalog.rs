//! Static token tables: known contract addresses, sector membership, logos
//! and provider ids. Built once on first use and never mutated.

use crate::models::Category;
use lazy_static::lazy_static;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownAddress {
    pub chain: &'static str,
    pub address: &'static str,
}

const fn known(chain: &'static str, address: &'static str) -> KnownAddress {
    KnownAddress { chain, address }
}

/// Sector membership, checked in this order.
pub const CATEGORY_TABLE: &[(Category, &[&str])] = &[
    (Category::Majors, &["BTC", "ETH", "BNB", "XRP", "SOL", "ADA", "DOT", "AVAX", "MATIC", "LTC"]),
    (Category::Ai, &["FET", "TAO", "RENDER", "OCEAN", "AGIX", "WLD", "ARKM", "AKT", "NMR", "RNDR"]),
    (Category::Rwa, &["ONDO", "MKR", "AAVE", "COMP", "SNX", "POLYX", "CFG", "MPL", "PROPC"]),
    (
        Category::Meme,
        &[
            "PEPE", "SHIB", "DOGE", "FLOKI", "BONK", "WIF", "BRETT", "POPCAT", "MOG", "NEIRO", "TURBO",
            "WOJAK", "LADYS", "COQ", "MEME",
        ],
    ),
    (
        Category::Defi,
        &["UNI", "CRV", "SUSHI", "CAKE", "1INCH", "LDO", "RPL", "GMX", "DYDX", "JUP", "RAY", "LINK"],
    ),
    (Category::L2, &["ARB", "OP", "IMX", "STRK", "ZK", "MANTA", "METIS", "BOBA"]),
    (Category::Gaming, &["AXS", "SAND", "MANA", "GALA", "ENJ", "BEAM", "PRIME", "PIXEL", "RONIN"]),
];

/// Watch lists used by the sector overview.
pub const SECTOR_WATCHLISTS: &[(Category, &[&str])] = &[
    (Category::Ai, &["FET", "TAO", "RENDER", "OCEAN", "AGIX", "WLD", "AKT", "ARKM"]),
    (Category::Rwa, &["ONDO", "PROPC", "MKR", "AAVE", "POLYX", "CFG", "MPL"]),
    (
        Category::Meme,
        &["PEPE", "SHIB", "FLOKI", "BONK", "WIF", "DOGE", "BRETT", "POPCAT", "MOG", "NEIRO"],
    ),
];

pub const MEME_KEYWORDS: &[&str] = &[
    "dog", "doge", "inu", "shib", "cat", "frog", "pepe", "wojak", "bonk", "floki", "meme", "moon",
    "elon", "trump", "maga", "biden", "chad", "wif",
];

pub const PLACEHOLDER_COLORS: [&str; 10] = [
    "6366f1", "8b5cf6", "ec4899", "f43f5e", "f97316", "eab308", "22c55e", "14b8a6", "06b6d4", "3b82f6",
];

lazy_static! {
    pub static ref KNOWN_ADDRESSES: HashMap<&'static str, KnownAddress> = {
        let mut m = HashMap::new();
        m.insert("BTC", known("ethereum", "0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599"));
        m.insert("ETH", known("ethereum", "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"));
        m.insert("BNB", known("bsc", "0xbb4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c"));
        m.insert("SOL", known("solana", "So11111111111111111111111111111111111111112"));
        m.insert("AVAX", known("avalanche", "0xB31f66AA3C1e785363F0875A1B74E27b85FD66c7"));
        m.insert("MATIC", known("polygon", "0x0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270"));
        m.insert("FET", known("ethereum", "0xaea46A60368A7bD060eec7DF8CBa43b7EF41Ad85"));
        m.insert("TAO", known("ethereum", "0x77E06c9eCCf2E797fd462A92B6D7642EF85b0A44"));
        m.insert("RENDER", known("ethereum", "0x6De037ef9aD2725EB40118Bb1702EBb27e4Aeb24"));
        m.insert("OCEAN", known("ethereum", "0x967da4048cD07aB37855c090aAF366e4ce1b9F48"));
        m.insert("AGIX", known("ethereum", "0x5B7533812759B45C2B44C19e320ba2cD2681b542"));
        m.insert("WLD", known("ethereum", "0x163f8C2467924be0ae7B5347228CABF260318753"));
        m.insert("ARKM", known("ethereum", "0x6E2a43be0B1d33b726f0CA3b8de60b3482b8b050"));
        m.insert("ONDO", known("ethereum", "0xfAbA6f8e4a5E8Ab82F62fe7C39859FA577269BE3"));
        m.insert("MKR", known("ethereum", "0x9f8F72aA9304c8B593d555F12eF6589cC3A579A2"));
        m.insert("AAVE", known("ethereum", "0x7Fc66500c84A76Ad7e9c93437bFc5Ac33E2DDaE9"));
        m.insert("COMP", known("ethereum", "0xc00e94Cb662C3520282E6f5717214004A7f26888"));
        m.insert("CFG", known("ethereum", "0xc221b7E65FfC80DE234bbB6667aBDd46593D34F0"));
        m.insert("PEPE", known("ethereum", "0x6982508145454Ce325dDbE47a25d4ec3d2311933"));
        m.insert("SHIB", known("ethereum", "0x95aD61b0a150d79219dCF64E1E6Cc01f0B64C4cE"));
        m.insert("FLOKI", known("ethereum", "0xcf0C122c6b73ff809C693DB761e7BaeBe62b6a2E"));
        m.insert("BONK", known("solana", "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263"));
        m.insert("WIF", known("solana", "EKpQGSJtjMFqKZ9KQanSqYXRcF8fBopzLHYxdM65zcjm"));
        m.insert("DOGE", known("ethereum", "0x4206931337dc273a630d328dA6441786BfaD668f"));
        m.insert("BRETT", known("base", "0x532f27101965dd16442E59d40670FaF5eBB142E4"));
        m.insert("POPCAT", known("solana", "7GCihgDB8fe6KNjn2MYtkzZcRjQy3t9GHdC8uHYmW2hr"));
        m.insert("MOG", known("ethereum", "0xaaeE1A9723aaDB7afA2810263653A34bA2C21C7a"));
        m.insert("NEIRO", known("ethereum", "0x812Ba41e071C7b7fA4EBcFB62dF5F45f6fA853Ee"));
        m.insert("TURBO", known("ethereum", "0xA35923162C49cF95e6BF26623385eb431ad920D3"));
        m.insert("WOJAK", known("ethereum", "0x5026F006B85729a8b14553FAE6af249aD16c9aaB"));
        m.insert("LADYS", known("ethereum", "0x12970E6868f88f6557B76120662c1B3E50A646bf"));
        m.insert("UNI", known("ethereum", "0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984"));
        m.insert("CRV", known("ethereum", "0xD533a949740bb3306d119CC777fa900bA034cd52"));
        m.insert("SUSHI", known("ethereum", "0x6B3595068778DD592e39A122f4f5a5cF09C90fE2"));
        m.insert("LDO", known("ethereum", "0x5A98FcBEA516Cf06857215779Fd812CA3beF1B32"));
        m.insert("GMX", known("arbitrum", "0xfc5A1A6EB076a2C7aD06eD22C90d7E710E35ad0a"));
        m.insert("DYDX", known("ethereum", "0x92D6C1e31e14520e676a687F0a93788B716BEff5"));
        m.insert("JUP", known("solana", "JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN"));
        m.insert("RAY", known("solana", "4k3Dyjzvzp8eMZWUXbBCjEvwSkkk59S5iCNLY3QrkX6R"));
        m.insert("CAKE", known("bsc", "0x0E09FaBB73Bd3Ade0a17ECC321fD13a19e81cE82"));
        m.insert("ARB", known("arbitrum", "0x912CE59144191C1204E64559FE8253a0e49E6548"));
        m.insert("OP", known("optimism", "0x4200000000000000000000000000000000000042"));
        m.insert("IMX", known("ethereum", "0xF57e7e7C23978C3cAEC3C3548E3D615c346e79fF"));
        m.insert("STRK", known("ethereum", "0xCa14007Eff0dB1f8135f4C25B34De49AB0d42766"));
        m.insert("MANTA", known("ethereum", "0x95CeF13441Be50d20cA4558CC0a27B601aC544E5"));
        m.insert("METIS", known("ethereum", "0x9E32b13ce7f2E80A01932B42553652E053D6ed8e"));
        m.insert("AXS", known("ethereum", "0xBB0E17EF65F82Ab018d8EDd776e8DD940327B28b"));
        m.insert("SAND", known("ethereum", "0x3845badAde8e6dFF049820680d1F14bD3903a5d0"));
        m.insert("MANA", known("ethereum", "0x0F5D2fB29fb7d3CFeE444a200298f468908cC942"));
        m.insert("GALA", known("ethereum", "0xd1d2Eb1B1e90B638588728b4130137D262C87cae"));
        m.insert("BEAM", known("ethereum", "0x62D0A8458eD7719FDAF978fe5929C6D342B0bFcE"));
        m.insert("PRIME", known("ethereum", "0xb23d80f5FefcDDaa212212F028021B41DEd428CF"));
        m.insert("LINK", known("ethereum", "0x514910771AF9Ca656af840dff83E8264EcF986CA"));
        m
    };

    pub static ref TOKEN_LOGOS: HashMap<&'static str, String> = {
        let base = "https://assets.coingecko.com/coins/images";
        let entries: &[(&str, &str)] = &[
            ("BTC", "1/small/bitcoin.png"),
            ("ETH", "279/small/ethereum.png"),
            ("SOL", "4128/small/solana.png"),
            ("BNB", "825/small/bnb-icon2_2x.png"),
            ("XRP", "44/small/xrp-symbol-white-128.png"),
            ("ADA", "975/small/cardano.png"),
            ("DOGE", "5/small/dogecoin.png"),
            ("AVAX", "12559/small/Avalanche_Circle_RedWhite_Trans.png"),
            ("DOT", "12171/small/polkadot.png"),
            ("MATIC", "4713/small/polygon.png"),
            ("LINK", "877/small/chainlink-new-logo.png"),
            ("FET", "5681/small/Fetch.jpg"),
            ("TAO", "28452/small/ARUsPeNQ_400x400.png"),
            ("RENDER", "11636/small/rndr.png"),
            ("OCEAN", "3687/small/ocean-protocol-logo.jpg"),
            ("AGIX", "2138/small/singularitynet.png"),
            ("WLD", "31069/small/worldcoin.jpeg"),
            ("ONDO", "26580/small/ONDO.png"),
            ("MKR", "1364/small/Mark_Maker.png"),
            ("AAVE", "12645/small/AAVE.png"),
            ("PEPE", "29850/small/pepe-token.jpeg"),
            ("SHIB", "11939/small/shiba.png"),
            ("FLOKI", "16746/small/FLOKI.png"),
            ("BONK", "28600/small/bonk.jpg"),
            ("WIF", "33566/small/dogwifhat.jpg"),
            ("BRETT", "35529/small/1000050750.png"),
            ("POPCAT", "33760/small/image.png"),
            ("MOG", "31059/small/MOG_LOGO_200x200.png"),
            ("UNI", "12504/small/uni.jpg"),
            ("CRV", "12124/small/Curve.png"),
            ("SUSHI", "12271/small/512x512_Logo_no_chop.png"),
            ("LDO", "13573/small/Lido_DAO.png"),
            ("GMX", "18323/small/arbit.png"),
            ("JUP", "34188/small/jup.png"),
            ("ARB", "16547/small/photo_2023-03-29_21.47.00.jpeg"),
            ("OP", "25244/small/Optimism.png"),
            ("IMX", "17233/small/immutableX-symbol-BLK-RGB.png"),
            ("STRK", "26433/small/starknet.png"),
            ("AXS", "13029/small/axie_infinity_logo.png"),
            ("SAND", "12129/small/sandbox_logo.jpg"),
            ("MANA", "878/small/decentraland-mana.png"),
            ("GALA", "12493/small/GALA.png"),
        ];
        entries
            .iter()
            .map(|(symbol, path)| (*symbol, format!("{}/{}", base, path)))
            .collect()
    };

    pub static ref COINGECKO_IDS: HashMap<&'static str, &'static str> = [
        ("BTC", "bitcoin"), ("ETH", "ethereum"), ("BNB", "binancecoin"), ("XRP", "ripple"),
        ("ADA", "cardano"), ("SOL", "solana"), ("DOGE", "dogecoin"), ("DOT", "polkadot"),
        ("AVAX", "avalanche-2"), ("MATIC", "matic-network"), ("LINK", "chainlink"),
        ("ATOM", "cosmos"), ("LTC", "litecoin"), ("UNI", "uniswap"), ("TRX", "tron"),
        ("FET", "fetch-ai"), ("TAO", "bittensor"), ("RENDER", "render-token"),
        ("OCEAN", "ocean-protocol"), ("AGIX", "singularitynet"), ("NMR", "numeraire"),
        ("RNDR", "render-token"), ("AKT", "akash-network"), ("ARKM", "arkham"),
        ("WLD", "worldcoin-wld"), ("ONDO", "ondo-finance"), ("PROPC", "propchain"),
        ("MKR", "maker"), ("AAVE", "aave"), ("COMP", "compound-governance-token"),
        ("SNX", "havven"), ("POLYX", "polymesh"), ("CFG", "centrifuge"), ("MPL", "maple"),
        ("PEPE", "pepe"), ("SHIB", "shiba-inu"), ("FLOKI", "floki"), ("BONK", "bonk"),
        ("WIF", "dogwifcoin"), ("MEME", "memecoin"), ("TURBO", "turbo"),
        ("LADYS", "milady-meme-coin"), ("COQ", "coq-inu"), ("WOJAK", "wojak"),
        ("BRETT", "brett"), ("POPCAT", "popcat"), ("MOG", "mog-coin"), ("NEIRO", "neiro-on-eth"),
        ("CRV", "curve-dao-token"), ("SUSHI", "sushi"), ("CAKE", "pancakeswap-token"),
        ("1INCH", "1inch"), ("LDO", "lido-dao"), ("RPL", "rocket-pool"), ("GMX", "gmx"),
        ("DYDX", "dydx"), ("JUP", "jupiter-exchange-solana"), ("RAY", "raydium"),
        ("ARB", "arbitrum"), ("OP", "optimism"), ("IMX", "immutable-x"), ("STRK", "starknet"),
        ("ZK", "zksync"), ("MANTA", "manta-network"), ("METIS", "metis-token"),
        ("BOBA", "boba-network"), ("AXS", "axie-infinity"), ("SAND", "the-sandbox"),
        ("MANA", "decentraland"), ("GALA", "gala"), ("ENJ", "enjincoin"), ("BEAM", "beam-2"),
        ("PRIME", "echelon-prime"), ("PIXEL", "pixels"), ("RONIN", "ronin"),
    ]
    .into_iter()
    .collect();

    pub static ref CMC_IDS: HashMap<&'static str, u32> = [
        ("BTC", 1), ("ETH", 1027), ("BNB", 1839), ("XRP", 52), ("ADA", 2010), ("SOL", 5426),
        ("DOGE", 74), ("DOT", 6636), ("AVAX", 5805), ("MATIC", 3890), ("LINK", 1975),
        ("ATOM", 3794), ("LTC", 2), ("UNI", 7083), ("TRX", 1958), ("FET", 3773),
        ("TAO", 22974), ("RENDER", 5690), ("OCEAN", 3911), ("AGIX", 2424), ("NMR", 1732),
        ("AKT", 7431), ("ARKM", 27565), ("WLD", 13502), ("ONDO", 21159), ("PROPC", 23656),
        ("MKR", 1518), ("AAVE", 7278), ("COMP", 5692), ("SNX", 2586), ("POLYX", 16951),
        ("CFG", 6748), ("MPL", 13648), ("PEPE", 24478), ("SHIB", 5994), ("FLOKI", 10804),
        ("BONK", 23095), ("WIF", 28752), ("MEME", 28301), ("TURBO", 24911), ("BRETT", 29743),
        ("POPCAT", 28782), ("MOG", 27659), ("NEIRO", 32441), ("WOJAK", 24613),
        ("LADYS", 25023), ("CRV", 6538), ("SUSHI", 6758), ("CAKE", 7186), ("1INCH", 8104),
        ("LDO", 8000), ("RPL", 2943), ("GMX", 11857), ("DYDX", 11156), ("JUP", 29210),
        ("RAY", 8526), ("ARB", 11841), ("OP", 11840), ("IMX", 10603), ("STRK", 22691),
        ("MANTA", 13631),
    ]
    .into_iter()
    .collect();

    pub static ref TOKEN_NAMES: HashMap<&'static str, &'static str> = [
        ("BTC", "Bitcoin"), ("ETH", "Ethereum"), ("BNB", "BNB"), ("XRP", "XRP"),
        ("SOL", "Solana"), ("ADA", "Cardano"), ("DOGE", "Dogecoin"), ("DOT", "Polkadot"),
        ("AVAX", "Avalanche"), ("MATIC", "Polygon"), ("LINK", "Chainlink"),
        ("FET", "Fetch.ai"), ("TAO", "Bittensor"), ("RENDER", "Render"),
        ("OCEAN", "Ocean Protocol"), ("AGIX", "SingularityNET"), ("WLD", "Worldcoin"),
        ("ARKM", "Arkham"), ("ONDO", "Ondo Finance"), ("MKR", "Maker"), ("AAVE", "Aave"),
        ("PEPE", "Pepe"), ("SHIB", "Shiba Inu"), ("FLOKI", "Floki"), ("BONK", "Bonk"),
        ("WIF", "dogwifhat"), ("UNI", "Uniswap"), ("ARB", "Arbitrum"), ("OP", "Optimism"),
    ]
    .into_iter()
    .collect();
}

/// Exact table membership for an uppercase symbol.
pub fn category_for(symbol: &str) -> Option<Category> {
    CATEGORY_TABLE
        .iter()
        .find(|(_, symbols)| symbols.contains(&symbol))
        .map(|(category, _)| *category)
}

/// Whether any static table knows this uppercase symbol.
pub fn is_known(symbol: &str) -> bool {
    KNOWN_ADDRESSES.contains_key(symbol)
        || COINGECKO_IDS.contains_key(symbol)
        || CMC_IDS.contains_key(symbol)
        || category_for(symbol).is_some()
}

pub fn display_name(symbol: &str) -> String {
    TOKEN_NAMES
        .get(symbol)
        .map(|name| name.to_string())
        .unwrap_or_else(|| symbol.to_string())
}

pub fn watchlist(category: Category) -> &'static [&'static str] {
    SECTOR_WATCHLISTS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, symbols)| *symbols)
        .unwrap_or(&[])
}

/// Symbols listed in the not-found hint.
pub fn supported_examples() -> &'static str {
    "BTC, ETH, SOL, FET, TAO, ONDO, PEPE, WIF, BONK, ARB, LINK"
}
