//! Default plan-name filter
//!
//! New York PPO plans administered by Anthem, as they appear in the
//! `plan_name` field of the 2024-05-01 Anthem index.

pub const NY_PPO_PLAN_NAMES: &[&str] = &[
    "PPO NY - AUTEL. US INC. - ANTHEM",
    "PPO NY - NEW YORK TECH BENEFITS PROGRAM - ANTHEM",
    "PPO NY - METROPOLITAN COUNCIL ON JEWISH POVERTY - ANTHEM",
    "PPO NY - HUDSON MX INC - ANTHEM",
    "PPO NY - GUILD TIMES BENEFITS FUND - ANTHEM",
    "PPO NY - DUTCHESS EDUCATION HEALTH INSURANCE CONSORTIUM - ANTHEM",
    "PPO NY - SAINT ANN'S SCHOOL - ANTHEM",
    "PPO NY - OASIS OUTSOURCING HOLDINGS INC. - ANTHEM",
    "PPO NY - CEWW HEALTH INSURANCE CONSORTIUM - ANTHEM",
    "PPO NY - UNITED FEDERATION OF TEACHERS STAFF & WELFARE PLAN - ANTHEM",
    "PPO NY - LYRA TECHNOLOGIES, INC - DBA BLOCK RENOVATION - ANTHEM",
    "PPO NY - COMMUNITY FEDERAL SAVINGS BANK - ANTHEM",
    "PPO NY - MANHATTAN WEST LLC - ANTHEM",
    "PPO NY - BALDOR SPECIALTY FOODS INC - ANTHEM",
    "PPO NY - THE BERKSHIRE BANK - ANTHEM",
    "PPO NY - OVERTIME SPORTS, INC - ANTHEM",
    "PPO NY - DATAMINR INC - ANTHEM",
    "PPO NY - RESTORIXHEALTH LLC - ANTHEM",
    "PPO NY - DAMASCUS BAKERY INC - ANTHEM",
    "PPO NY - IM PRO MAKEUP NY L.P. - ANTHEM",
    "PPO NY - INTREPID MUSEUM FOUNDATION - ANTHEM",
    "PPO NY - ADP TOTALSOURCE - ANTHEM",
    "PPO NY - MAVIS TIRE SUPPLY CORP - ANTHEM",
    "PPO NY - CAMBRIDGE UNIVERSITY PRESS - ANTHEM",
    "PPO NY - WCM SERVICES LLC - ANTHEM",
    "PPO NY - ASSOCIATION TO BENEFIT CHILDREN - ANTHEM",
    "PPO NY - LIVEONNY - ANTHEM",
    "PPO NY - BUZZFEED INC - ANTHEM",
    "PPO NY - MGM YONKERS INC. - ANTHEM",
    "PPO NY - SHENENDEHOWA CENTRAL SCHOOL DISTRICT - ANTHEM",
    "PPO NY - TNTP, INC. - ANTHEM",
    "PPO NY - BERLINROSEN HOLDINGS LLC - ANTHEM",
    "PPO NY - JOY CONSTRUCTION CORPORATION - ANTHEM",
    "PPO NY - BWD MILE DEVELOPMENT LLC - ANTHEM",
    "PPO NY - NAACP LEGAL DEFENSE AND EDUCATIONAL FUND, INC. - ANTHEM",
    "PPO NY - CHRISTIAN LOUBOUTIN LLC - ANTHEM",
    "PPO NY - BALL CHAIN MANUFACTURING CO, INC. - ANTHEM",
    "PPO NY - OELS ONONDAGA EMPLOYEE LEASING SERVICES - ANTHEM",
    "PPO NY - BASIN HOLDINGS LLC - ANTHEM",
    "PPO NY - GRAMERCY GROUP, INC. - ANTHEM",
    "PPO NY - MAGNOLIA OPERATING LLC - ANTHEM",
    "PPO NY - K HEALTH, INC. - ANTHEM",
    "PPO NY - WONDER - ANTHEM",
];
