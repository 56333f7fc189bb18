//! Static content tables: the board ring, tiered question banks, and
//! decision trees.
//!
//! Everything here is immutable data fixed at startup. Lookups for ids that
//! are not in the tables are programming errors and panic rather than
//! returning a recoverable error.

use crate::game::state::Tier;
use serde::Serialize;

/// Number of tiles on the board ring.
pub const BOARD_SIZE: u8 = 12;

/// What kind of interaction a tile triggers on landing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TileKind {
    /// The payday tile; grants a flat bonus, no prompt.
    Start,
    /// Straight trivia question.
    Trivia,
    /// Narrative choice with pre-authored consequences.
    Decision,
    /// Question that unlocks passive income when answered correctly.
    Invest,
    /// Question with a harsher cash penalty when answered incorrectly.
    Risk,
}

/// One position on the board ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tile {
    /// Tile id, 1-indexed and cyclic.
    pub id: u8,
    /// Display label.
    pub label: &'static str,
    /// Interaction kind.
    pub kind: TileKind,
}

/// The fixed 12-tile board.
pub const TILES: [Tile; BOARD_SIZE as usize] = [
    Tile { id: 1, label: "Start: Payday", kind: TileKind::Start },
    Tile { id: 2, label: "Budget Basics", kind: TileKind::Trivia },
    Tile { id: 3, label: "Start a Business", kind: TileKind::Decision },
    Tile { id: 4, label: "High-Yield Savings", kind: TileKind::Trivia },
    Tile { id: 5, label: "Real Estate Deal", kind: TileKind::Invest },
    Tile { id: 6, label: "Bank Loan / Line of Credit", kind: TileKind::Decision },
    Tile { id: 7, label: "Stocks / ETFs", kind: TileKind::Invest },
    Tile { id: 8, label: "Crypto Volatility", kind: TileKind::Risk },
    Tile { id: 9, label: "Foreclosure / Refinance / HELOC", kind: TileKind::Risk },
    Tile { id: 10, label: "Estate Planning / Trust", kind: TileKind::Trivia },
    Tile { id: 11, label: "Tax Liens / Tax Deeds", kind: TileKind::Trivia },
    Tile { id: 12, label: "Goal Setting & Review", kind: TileKind::Decision },
];

/// Returns the tile with the given id.
///
/// # Panics
///
/// Panics if `id` is outside `1..=BOARD_SIZE`. The board is fully enumerated
/// at startup, so an out-of-range id is a bug in the caller.
pub fn tile(id: u8) -> &'static Tile {
    assert!(
        (1..=BOARD_SIZE).contains(&id),
        "tile id {id} outside the board ring"
    );
    &TILES[(id - 1) as usize]
}

/// A single trivia question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    /// Topic tag, used for display grouping.
    pub topic: &'static str,
    /// Prompt text.
    pub prompt: &'static str,
    /// Ordered answer options.
    pub answers: &'static [&'static str],
    /// Index of the correct answer within `answers`.
    pub correct: usize,
    /// Shown after answering, right or wrong.
    pub explanation: &'static str,
}

/// Returns the question bank for a difficulty tier.
pub fn question_bank(tier: Tier) -> &'static [Question] {
    match tier {
        Tier::Kids => &KIDS_QUESTIONS,
        Tier::Teens => &TEENS_QUESTIONS,
        Tier::Adults => &ADULTS_QUESTIONS,
    }
}

/// Passive income unlocked by a correct answer on an invest tile.
pub fn invest_passive_reward(tier: Tier) -> i32 {
    match tier {
        Tier::Kids => 20,
        Tier::Teens => 35,
        Tier::Adults => 50,
    }
}

macro_rules! question {
    ($topic:literal, $prompt:literal, [$($answer:literal),+ $(,)?], $correct:literal, $exp:literal) => {
        Question {
            topic: $topic,
            prompt: $prompt,
            answers: &[$($answer),+],
            correct: $correct,
            explanation: $exp,
        }
    };
}

const KIDS_QUESTIONS: [Question; 30] = [
    question!("saving", "What does it mean to save money?", ["Spend it now", "Keep it for later", "Throw it away"], 1, "Saving means holding money for future needs or goals."),
    question!("budget", "A budget is a plan for your…", ["Games", "Money", "Shoes"], 1, "A budget helps you decide how to use money."),
    question!("banking", "Where can people keep money safe?", ["A bank", "A pizza box", "A sidewalk"], 0, "Banks are made for storing money safely."),
    question!("needswants", "Food is a…", ["Need", "Want", "Toy"], 0, "Needs are required to live."),
    question!("needswants", "A new video game is usually a…", ["Need", "Want", "Rule"], 1, "Wants are fun but not required."),
    question!("income", "Money you earn from work is called…", ["Income", "Dust", "Candy"], 0, "Income is money you receive for working."),
    question!("business", "A business makes money by…", ["Helping people", "Breaking things", "Hiding"], 0, "Businesses solve problems for customers."),
    question!("goals", "A good money goal should be…", ["Clear", "Secret", "Impossible"], 0, "Clear goals are easier to plan for."),
    question!("interest", "Interest is…", ["Extra money added", "A snack", "A jacket"], 0, "Interest can be earned on savings."),
    question!("hysa", "A high-yield savings account usually gives…", ["More interest", "Less interest", "No interest"], 0, "HYSA often pays higher interest than regular savings."),
    question!("spending", "Tracking spending means you…", ["Forget purchases", "Write down what you buy", "Buy more"], 1, "Tracking shows where your money goes."),
    question!("taxes", "Taxes are money paid to…", ["Government", "Cartoons", "Pets"], 0, "Taxes help pay for public services."),
    question!("stocks", "Buying a stock means you own a…", ["Piece of a company", "Piece of candy", "Piece of paper only"], 0, "A stock can represent ownership in a company."),
    question!("diversify", "Diversifying means…", ["All money in one thing", "Spreading money across choices", "Never saving"], 1, "Spreading out can reduce risk."),
    question!("crypto", "Crypto is a type of…", ["Digital money", "Homework", "Food"], 0, "Crypto is a digital asset people can buy/sell."),
    question!("scams", "A scam is when someone tries to…", ["Help you", "Trick you for money", "Teach you"], 1, "Scammers try to steal money or information."),
    question!("credit", "Credit means…", ["Borrow now, pay later", "Free money forever", "No money"], 0, "Credit lets you borrow and repay later."),
    question!("debt", "Debt is money you…", ["Owe", "Found", "Threw away"], 0, "Debt must be paid back."),
    question!("insurance", "Insurance helps you…", ["Protect from big costs", "Get candy", "Win games"], 0, "Insurance reduces financial risk."),
    question!("realestate", "Real estate usually means…", ["Houses/land", "Shoes", "Phones"], 0, "Real estate is property like land and homes."),
    question!("rent", "Rent is money you pay to…", ["Live in a place you don’t own", "Buy a toy", "Get a snack"], 0, "Rent is paid to use a home or apartment."),
    question!("mortgage", "A mortgage is a loan for a…", ["House", "Bicycle", "Backpack"], 0, "A mortgage helps buy a home."),
    question!("foreclosure", "Foreclosure can happen if you…", ["Pay on time", "Don’t pay the mortgage", "Paint the house"], 1, "Missing payments can cause foreclosure."),
    question!("goalsetting", "The first step to reaching a goal is to…", ["Write it down", "Forget it", "Hide it"], 0, "Writing goals makes them real."),
    question!("entrepreneurship", "An entrepreneur is someone who…", ["Starts a business", "Only plays games", "Never works"], 0, "Entrepreneurs build businesses."),
    question!("profit", "Profit is money left after…", ["Expenses", "Sleep", "Homework"], 0, "Profit = money in minus money out."),
    question!("expenses", "An expense is…", ["Money you spend", "Money you earn", "A coupon"], 0, "Expenses are costs you pay."),
    question!("cashflow", "Cash flow is about money…", ["Coming in and going out", "Staying hidden", "Turning into candy"], 0, "Cash flow tracks income and expenses."),
    question!("emergencyfund", "An emergency fund is for…", ["Surprises", "More toys always", "Nothing"], 0, "It helps during unexpected events."),
    question!("banking", "A checking account is used for…", ["Everyday spending", "Hiding money", "Buying houses"], 0, "Checking is for daily transactions."),
];

const TEENS_QUESTIONS: [Question; 10] = [
    question!("budget", "A budget mainly helps you…", ["Control spending", "Increase taxes", "Avoid saving"], 0, "A budget is a plan for income and expenses."),
    question!("hysa", "HYSA is best for money you want…", ["Safe + earning interest", "Locked for 30 years", "To gamble"], 0, "HYSA is for safer cash with interest."),
    question!("credit", "A credit score mostly measures your…", ["Payment history & debt behavior", "Height", "Job title"], 0, "Scores reflect how you handle borrowing."),
    question!("debt", "Interest on debt means you…", ["Pay extra", "Pay less", "Pay nothing"], 0, "Interest is the cost of borrowing."),
    question!("stocks", "Stocks usually grow by…", ["Company performance", "Magic", "Luck only"], 0, "Stocks depend on business results and markets."),
    question!("etf", "ETFs can help because they are…", ["Diversified", "Always risk-free", "Only crypto"], 0, "ETFs often hold many investments."),
    question!("mutualfunds", "Mutual funds are typically…", ["Professionally managed pools", "Lottery tickets", "Bank loans"], 0, "They pool money into a portfolio."),
    question!("crypto", "Crypto volatility means prices can…", ["Swing quickly", "Never change", "Only go up"], 0, "Volatility = fast price movement."),
    question!("risk", "Higher reward investments usually have…", ["Higher risk", "No risk", "Guaranteed results"], 0, "Risk and reward often rise together."),
    question!("banking", "A checking account is used for…", ["Bills & daily spending", "Long-term investing", "Buying options"], 0, "Checking supports transactions."),
];

const ADULTS_QUESTIONS: [Question; 10] = [
    question!("estateplanning", "A trust can help reduce…", ["Probate delays", "Your income instantly", "All taxes always"], 0, "Trusts often streamline inheritance and control distribution."),
    question!("taxliens", "Tax lien investing often earns returns through…", ["Interest/penalties paid by owner", "Rent from tenants", "Stock dividends"], 0, "Lien investors may earn interest when taxes are repaid."),
    question!("taxdeeds", "A tax deed typically means the investor…", ["Buys the property at tax sale", "Buys an ETF", "Gets a bank loan"], 0, "Deeds can transfer ownership after tax sale rules."),
    question!("heloc", "A HELOC is a…", ["Revolving credit line on home equity", "Fixed-rate student loan", "Checking account"], 0, "HELOCs borrow against equity, often variable rate."),
    question!("refinance", "Refinancing can lower payments if…", ["Rate/term improves after costs", "You skip underwriting always", "It’s free"], 0, "Costs matter; compare breakeven time."),
    question!("options", "A call option gives the right to…", ["Buy at a strike price", "Sell at any price", "Borrow from a bank"], 0, "Calls = right to buy; puts = right to sell."),
    question!("options", "A put option gives the right to…", ["Sell at a strike price", "Buy at any price", "Earn fixed interest"], 0, "Puts are often used for hedging downside."),
    question!("insurance", "Term life insurance is generally for…", ["Income replacement during key years", "Guaranteed investment growth", "Avoiding all taxes"], 0, "Term is protection-focused, not an investment."),
    question!("business", "Healthy business cash flow means…", ["Income exceeds expenses reliably", "You have many logos", "You avoid budgeting"], 0, "Cash flow is oxygen for business survival."),
    question!("investing", "Diversification reduces…", ["Concentration risk", "All risk", "All taxes"], 0, "It helps reduce single-asset blowups."),
];

/// Template for the line logged after a decision choice is applied.
///
/// The original implementation attached a closure to every choice; here the
/// line is plain data with two named placeholders: `{cash}` renders the
/// player's cash after the choice, `{passive}` renders the choice's passive
/// income delta. Both render as `$`-prefixed absolute amounts with thousands
/// separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultLine {
    template: &'static str,
}

impl ResultLine {
    /// Creates a result line from a template string.
    pub const fn new(template: &'static str) -> Self {
        Self { template }
    }

    /// Renders the template against the post-apply cash and passive delta.
    pub fn render(&self, cash: i32, passive_delta: i32) -> String {
        self.template
            .replace("{cash}", &format_money(cash))
            .replace("{passive}", &format_money(passive_delta))
    }
}

/// Formats an amount as `$1,234`, using the absolute value.
pub fn format_money(amount: i32) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    let lead = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// One option within a decision prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionChoice {
    /// Menu label.
    pub label: &'static str,
    /// Immediate cash adjustment.
    pub cash_delta: i32,
    /// Passive income adjustment.
    pub passive_delta: i32,
    /// Score adjustment (applied with the score floor).
    pub score_delta: i32,
    /// Teaching note shown with the outcome.
    pub explanation: &'static str,
    /// Log line template for the outcome.
    pub result_line: ResultLine,
}

/// A decision prompt with exactly three choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Prompt shown above the choices.
    pub prompt: &'static str,
    /// The three options, in display order.
    pub choices: [DecisionChoice; 3],
}

/// Builds the decision for a tile, scaled by tier.
///
/// Tiles 3, 6, and 12 have specially authored decisions; every other
/// decision tile falls back to a generic money-move prompt.
pub fn decision_for(tile_id: u8, tier: Tier) -> Decision {
    match tile_id {
        3 => Decision {
            prompt: "Starting a small business: what’s your move?",
            choices: [
                DecisionChoice {
                    label: "Start a simple service (low cost) - pay $120, learn customers",
                    cash_delta: -120,
                    passive_delta: if tier == Tier::Kids { 10 } else { 20 },
                    score_delta: 12,
                    explanation: "Low-cost businesses teach sales and can become repeat income.",
                    result_line: ResultLine::new(
                        "✅ You started small. Cash {cash}. Passive +{passive}.",
                    ),
                },
                DecisionChoice {
                    label: "Buy expensive gear with no plan - pay $220",
                    cash_delta: -220,
                    passive_delta: 0,
                    score_delta: -6,
                    explanation: "Spending before validating demand can drain cash fast.",
                    result_line: ResultLine::new(
                        "❌ Costly lesson. Cash {cash}. Validate demand first.",
                    ),
                },
                DecisionChoice {
                    label: "Do market research first (free) - gain strategy points",
                    cash_delta: 0,
                    passive_delta: 0,
                    score_delta: 8,
                    explanation: "Research reduces risk and improves future decisions.",
                    result_line: ResultLine::new(
                        "✅ Smart move. You learned your market. Score +8.",
                    ),
                },
            ],
        },
        6 => Decision {
            prompt: "Banking: You need capital. What do you choose?",
            choices: [
                DecisionChoice {
                    label: "Apply for a small business loan (pay $60 fees, +$140 passive later)",
                    cash_delta: -60,
                    passive_delta: match tier {
                        Tier::Kids => 10,
                        Tier::Teens => 25,
                        Tier::Adults => 35,
                    },
                    score_delta: 10,
                    explanation:
                        "Debt can help if it funds revenue that exceeds the cost of borrowing.",
                    result_line: ResultLine::new(
                        "✅ You used credit wisely. Passive income increased.",
                    ),
                },
                DecisionChoice {
                    label: "Open a line of credit and spend it on wants (-$150)",
                    cash_delta: -150,
                    passive_delta: 0,
                    score_delta: -10,
                    explanation:
                        "Using credit for non-productive spending creates stress and interest costs.",
                    result_line: ResultLine::new("❌ Debt without returns hurts."),
                },
                DecisionChoice {
                    label: "Bootstrap: save first (free) + small bonus",
                    cash_delta: 40,
                    passive_delta: 0,
                    score_delta: 6,
                    explanation: "Saving builds a buffer and reduces reliance on debt.",
                    result_line: ResultLine::new(
                        "✅ You boosted your savings discipline. +$40 cash.",
                    ),
                },
            ],
        },
        12 => Decision {
            prompt: "Goal Setting: Pick a wealth plan for the next 3 turns.",
            choices: [
                DecisionChoice {
                    label: "Auto-save + invest (pay $80 now, +$40 passive)",
                    cash_delta: -80,
                    passive_delta: match tier {
                        Tier::Kids => 15,
                        Tier::Teens => 30,
                        Tier::Adults => 40,
                    },
                    score_delta: 12,
                    explanation: "Automating good behavior is a powerful wealth habit.",
                    result_line: ResultLine::new(
                        "✅ Automation activated. Passive income rose.",
                    ),
                },
                DecisionChoice {
                    label: "No plan (do nothing)",
                    cash_delta: 0,
                    passive_delta: 0,
                    score_delta: -2,
                    explanation: "Without goals, money drifts into spending.",
                    result_line: ResultLine::new(
                        "⚠️ No plan. Try setting a clear target next time.",
                    ),
                },
                DecisionChoice {
                    label: "Increase income: side hustle sprint (+$120 cash, -$10 passive)",
                    cash_delta: 120,
                    passive_delta: -10,
                    score_delta: 6,
                    explanation: "Active income is great, but passive is what wins long term.",
                    result_line: ResultLine::new(
                        "✅ Great hustle. Consider rebuilding passive income next.",
                    ),
                },
            ],
        },
        _ => Decision {
            prompt: "Decision: Choose a smart money move.",
            choices: [
                DecisionChoice {
                    label: "Save 10% ( +$30 cash buffer )",
                    cash_delta: 30,
                    passive_delta: 0,
                    score_delta: 5,
                    explanation: "Small buffers prevent big problems.",
                    result_line: ResultLine::new("✅ Buffer built."),
                },
                DecisionChoice {
                    label: "Invest for the long term ( -$50 cash, +$20 passive )",
                    cash_delta: -50,
                    passive_delta: 20,
                    score_delta: 10,
                    explanation: "Investing grows wealth over time.",
                    result_line: ResultLine::new(
                        "✅ Long-term investing increased passive income.",
                    ),
                },
                DecisionChoice {
                    label: "Impulse spend ( -$70 )",
                    cash_delta: -70,
                    passive_delta: 0,
                    score_delta: -6,
                    explanation: "Impulse spending delays goals.",
                    result_line: ResultLine::new("❌ Ouch. Try a spending plan."),
                },
            ],
        },
    }
}
