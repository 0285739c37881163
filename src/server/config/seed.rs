//! Seed data for profiles that ship with an initial firm list.

#[derive(Debug, PartialEq, Eq)]
pub struct SeedFirm {
    pub name: &'static str,
    pub website: &'static str,
    pub stage: &'static str,
}

pub const IB_SEED_FIRMS: &[SeedFirm] = &[
    SeedFirm {
        name: "Goldman Sachs",
        website: "https://www.goldmansachs.com",
        stage: "bulge bracket",
    },
    SeedFirm {
        name: "Morgan Stanley",
        website: "https://www.morganstanley.com",
        stage: "bulge bracket",
    },
    SeedFirm {
        name: "J.P. Morgan",
        website: "https://www.jpmorgan.com",
        stage: "bulge bracket",
    },
    SeedFirm {
        name: "Bank of America",
        website: "https://www.bankofamerica.com",
        stage: "bulge bracket",
    },
    SeedFirm {
        name: "Citigroup",
        website: "https://www.citigroup.com",
        stage: "bulge bracket",
    },
    SeedFirm {
        name: "Barclays",
        website: "https://www.barclays.com",
        stage: "bulge bracket",
    },
    SeedFirm {
        name: "Credit Suisse",
        website: "https://www.credit-suisse.com",
        stage: "bulge bracket",
    },
    SeedFirm {
        name: "Deutsche Bank",
        website: "https://www.db.com",
        stage: "bulge bracket",
    },
    SeedFirm {
        name: "UBS",
        website: "https://www.ubs.com",
        stage: "bulge bracket",
    },
    SeedFirm {
        name: "HSBC",
        website: "https://www.hsbc.com",
        stage: "bulge bracket",
    },
    SeedFirm {
        name: "Lazard",
        website: "https://www.lazard.com",
        stage: "elite boutique",
    },
    SeedFirm {
        name: "Evercore",
        website: "https://www.evercore.com",
        stage: "elite boutique",
    },
    SeedFirm {
        name: "Centerview Partners",
        website: "https://www.centerviewpartners.com",
        stage: "elite boutique",
    },
    SeedFirm {
        name: "Moelis & Company",
        website: "https://www.moelis.com",
        stage: "elite boutique",
    },
    SeedFirm {
        name: "Rothschild & Co",
        website: "https://www.rothschildandco.com",
        stage: "elite boutique",
    },
    SeedFirm {
        name: "PJT Partners",
        website: "https://www.pjtpartners.com",
        stage: "elite boutique",
    },
    SeedFirm {
        name: "Perella Weinberg Partners",
        website: "https://www.pwpartners.com",
        stage: "elite boutique",
    },
    SeedFirm {
        name: "Greenhill & Co",
        website: "https://www.greenhill.com",
        stage: "elite boutique",
    },
    SeedFirm {
        name: "Guggenheim Partners",
        website: "https://www.guggenheimpartners.com",
        stage: "elite boutique",
    },
    SeedFirm {
        name: "Houlihan Lokey",
        website: "https://www.hl.com",
        stage: "elite boutique",
    },
    SeedFirm {
        name: "Jefferies",
        website: "https://www.jefferies.com",
        stage: "elite boutique",
    },
    SeedFirm {
        name: "Qatalyst Partners",
        website: "https://www.qatalyst.com",
        stage: "elite boutique",
    },
    SeedFirm {
        name: "LionTree Advisors",
        website: "https://www.liontree.com",
        stage: "elite boutique",
    },
    SeedFirm {
        name: "Allen & Company",
        website: "https://www.allenco.com",
        stage: "elite boutique",
    },
    SeedFirm {
        name: "Raine Group",
        website: "https://www.raine.com",
        stage: "elite boutique",
    },
    SeedFirm {
        name: "Ardea Partners",
        website: "https://www.ardeapartners.com",
        stage: "elite boutique",
    },
    SeedFirm {
        name: "William Blair",
        website: "https://www.williamblair.com",
        stage: "middle market",
    },
    SeedFirm {
        name: "Piper Sandler",
        website: "https://www.pipersandler.com",
        stage: "middle market",
    },
    SeedFirm {
        name: "Raymond James",
        website: "https://www.raymondjames.com",
        stage: "middle market",
    },
    SeedFirm {
        name: "Stifel",
        website: "https://www.stifel.com",
        stage: "middle market",
    },
    SeedFirm {
        name: "Robert W. Baird",
        website: "https://www.rwbaird.com",
        stage: "middle market",
    },
    SeedFirm {
        name: "Lincoln International",
        website: "https://www.lincolninternational.com",
        stage: "middle market",
    },
    SeedFirm {
        name: "Harris Williams",
        website: "https://www.harriswilliams.com",
        stage: "middle market",
    },
    SeedFirm {
        name: "KeyBanc Capital Markets",
        website: "https://www.key.com",
        stage: "middle market",
    },
    SeedFirm {
        name: "BMO Capital Markets",
        website: "https://www.bmo.com",
        stage: "middle market",
    },
    SeedFirm {
        name: "Wells Fargo Securities",
        website: "https://www.wellsfargo.com",
        stage: "middle market",
    },
    SeedFirm {
        name: "RBC Capital Markets",
        website: "https://www.rbccm.com",
        stage: "middle market",
    },
    SeedFirm {
        name: "Cowen",
        website: "https://www.cowen.com",
        stage: "middle market",
    },
    SeedFirm {
        name: "Stephens",
        website: "https://www.stephens.com",
        stage: "middle market",
    },
    SeedFirm {
        name: "Truist Securities",
        website: "https://www.truist.com",
        stage: "middle market",
    },
    SeedFirm {
        name: "Oppenheimer & Co",
        website: "https://www.opco.com",
        stage: "middle market",
    },
    SeedFirm {
        name: "Canaccord Genuity",
        website: "https://www.canaccordgenuity.com",
        stage: "middle market",
    },
    SeedFirm {
        name: "Needham & Company",
        website: "https://www.needhamco.com",
        stage: "middle market",
    },
    SeedFirm {
        name: "D.A. Davidson",
        website: "https://www.dadavidson.com",
        stage: "middle market",
    },
    SeedFirm {
        name: "Macquarie Capital",
        website: "https://www.macquarie.com",
        stage: "middle market",
    },
    SeedFirm {
        name: "Imperial Capital",
        website: "https://www.imperialcapital.com",
        stage: "middle market",
    },
    SeedFirm {
        name: "Nomura",
        website: "https://www.nomura.com",
        stage: "middle market",
    },
    SeedFirm {
        name: "Mizuho Financial Group",
        website: "https://www.mizuhogroup.com",
        stage: "middle market",
    },
    SeedFirm {
        name: "BNP Paribas",
        website: "https://group.bnpparibas",
        stage: "middle market",
    },
    SeedFirm {
        name: "SMBC Nikko Securities",
        website: "https://www.smbcnikko.co.jp/en",
        stage: "middle market",
    },
    SeedFirm {
        name: "FT Partners",
        website: "https://www.ftpartners.com",
        stage: "middle market",
    },
    SeedFirm {
        name: "DC Advisory",
        website: "https://www.dcadvisory.com",
        stage: "middle market",
    },
];
