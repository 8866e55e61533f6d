//! Clean-code rules, in guide order. Single source of truth for the CLI, the MCP
//! server and the generated style guide.

use serde::Serialize;

/// One documented guideline with an illustrative before/after pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Stable identifier, e.g. "error-handling"
    pub id: &'static str,
    /// Short label shown in listings
    pub title: &'static str,
    /// Prose explanation of the guideline
    pub description: &'static str,
    /// Imperative one-liners summarizing what to do
    pub guidance: &'static [&'static str],
    pub bad_example: &'static str,
    pub good_example: &'static str,
}

pub const RULES: &[Rule] = &[
    Rule {
        id: "naming",
        title: "Naming conventions",
        description: "\
Names are the first documentation a reader sees. A good name says what a value holds or what a \
function does, in the vocabulary of the problem domain, without forcing the reader to look at the \
implementation. Prefer clarity over brevity; single letters are only acceptable for tiny scopes \
such as loop indices or closure arguments.",
        guidance: &[
            "Use intention-revealing names: `elapsed_days`, not `d`.",
            "Avoid abbreviations and encodings such as `usrMgr` or `strName`.",
            "Name functions after the action they perform: `send_invoice`, `parse_header`.",
            "Name booleans as predicates: `is_empty`, `has_children`.",
            "Follow the casing of the language: snake_case items, CamelCase types, SCREAMING_CASE consts.",
        ],
        bad_example: r#"fn calc(d: &[f64], f: bool) -> f64 {
    let mut t = 0.0;
    for x in d {
        t += x;
    }
    if f { t * 1.2 } else { t }
}"#,
        good_example: r#"fn invoice_total(line_amounts: &[f64], include_vat: bool) -> f64 {
    let subtotal: f64 = line_amounts.iter().sum();
    if include_vat { subtotal * VAT_MULTIPLIER } else { subtotal }
}"#,
    },
    Rule {
        id: "functions",
        title: "Small, single-purpose functions",
        description: "\
A function should do one thing, do it completely, and operate at a single level of abstraction. \
Long functions that mix validation, persistence and presentation are hard to name, hard to test \
and hard to change. Extract each step into a helper whose name replaces a comment.",
        guidance: &[
            "Keep functions short enough to read without scrolling.",
            "Limit parameters; group related ones into a struct.",
            "Avoid boolean flag arguments that switch behavior; write two functions instead.",
            "Avoid hidden side effects that the name does not announce.",
            "Return early instead of nesting conditionals.",
        ],
        bad_example: r#"fn handle(user: &User, save: bool) {
    if user.email.contains('@') {
        if save {
            db::insert(user);
            mailer::send_welcome(&user.email);
        }
        println!("ok {}", user.name);
    }
}"#,
        good_example: r#"fn register(user: &User) -> Result<(), RegistrationError> {
    validate_email(&user.email)?;
    db::insert(user)?;
    mailer::send_welcome(&user.email)?;
    Ok(())
}"#,
    },
    Rule {
        id: "error-handling",
        title: "Explicit error handling",
        description: "\
Failures are part of a function's contract. Return them as typed errors, propagate them with \
context, and handle them at the layer that can actually decide what to do. Never silence an \
error, and never let a recoverable failure crash the process.",
        guidance: &[
            "Return `Result` for operations that can fail; reserve panics for broken invariants.",
            "Propagate with `?` and add context describing what was being attempted.",
            "Do not swallow errors with `let _ =` or empty match arms.",
            "Use a dedicated error type in libraries and a catch-all error in binaries.",
            "Do not use `unwrap()` outside tests and prototypes.",
        ],
        bad_example: r#"fn load_config(path: &str) -> Config {
    let text = std::fs::read_to_string(path).unwrap();
    match toml::from_str(&text) {
        Ok(cfg) => cfg,
        Err(_) => Config::default(),
    }
}"#,
        good_example: r#"fn load_config(path: &Path) -> anyhow::Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config = toml::from_str(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}"#,
    },
    Rule {
        id: "structure",
        title: "Module structure",
        description: "\
Organize code so that things that change together live together. Group by feature rather than by \
technical layer, keep public surfaces small, and make dependencies point in one direction. A \
reader should be able to guess where a piece of behavior lives from the directory tree alone.",
        guidance: &[
            "Group code by feature or domain concept.",
            "Expose a narrow public API; keep helpers private.",
            "Keep entry points such as `main.rs` thin; move logic into the library.",
            "Avoid cyclic dependencies between modules.",
            "Order a file from high-level items down to the details they use.",
        ],
        bad_example: r#"src/
  models.rs      // every struct in the program
  utils.rs       // 2,000 lines of unrelated helpers
  handlers.rs    // all HTTP handlers for every feature
  main.rs        // argument parsing, business logic, I/O"#,
        good_example: r#"src/
  main.rs        // parse arguments, call into the library
  lib.rs
  billing/
    mod.rs       // pub use of the billing API
    invoice.rs
    tax.rs
  accounts/
    mod.rs
    signup.rs"#,
    },
    Rule {
        id: "tests",
        title: "Readable tests",
        description: "\
A test is an executable example of how the code is meant to behave. Each test should check one \
behavior, name that behavior, and read top to bottom as arrange, act, assert. Tests that are \
hard to read stop being maintained and end up deleted or ignored.",
        guidance: &[
            "Name the test after the behavior under test.",
            "Check one behavior per test.",
            "Structure the body as arrange, act, assert.",
            "Keep tests independent of each other and of execution order.",
            "Prefer real values over mocks when they are cheap to build.",
        ],
        bad_example: r#"#[test]
fn test1() {
    let mut c = Cart::new();
    c.add(Item::new("a", 3));
    assert!(c.total() == 3);
    c.remove("a");
    assert!(c.total() == 0);
    c.add(Item::new("b", 0));
    assert!(c.is_empty() == false);
}"#,
        good_example: r#"#[test]
fn removing_the_only_item_empties_the_cart() {
    let mut cart = Cart::new();
    cart.add(Item::new("book", 3));

    cart.remove("book");

    assert_eq!(cart.total(), 0);
}"#,
    },
    Rule {
        id: "variables",
        title: "Variable scope and mutability",
        description: "\
Declare variables as close as possible to where they are used, give them the narrowest scope \
that works, and make them immutable unless mutation is the point. Fewer moving parts means fewer \
states a reader has to track.",
        guidance: &[
            "Declare variables next to their first use.",
            "Prefer immutable bindings; add `mut` only when needed.",
            "Replace magic numbers with named constants.",
            "Do not reuse one variable for unrelated purposes.",
            "Compute values with expressions instead of mutating accumulators.",
        ],
        bad_example: r#"let mut i = 0;
let mut result = Vec::new();
let mut tmp;
while i < orders.len() {
    tmp = orders[i].amount * 86400;
    result.push(tmp);
    i += 1;
}"#,
        good_example: r#"const SECONDS_PER_DAY: u64 = 86_400;

let scaled: Vec<u64> = orders
    .iter()
    .map(|order| order.amount * SECONDS_PER_DAY)
    .collect();"#,
    },
    Rule {
        id: "data-structures",
        title: "Purpose-built data structures",
        description: "\
Model the domain with types instead of passing loosely related primitives around. Enums make \
invalid states unrepresentable, newtypes prevent mixing up identifiers, and choosing the right \
collection documents how the data is accessed.",
        guidance: &[
            "Wrap identifiers in newtypes instead of bare strings or integers.",
            "Use enums for closed sets of states instead of strings or flags.",
            "Choose the collection that matches access patterns: `HashMap` for lookup, `Vec` for order.",
            "Keep related fields together in a struct rather than parallel collections.",
        ],
        bad_example: r#"fn ship(order_id: String, customer_id: String, status: &str) {
    if status == "paid" || status == "Paid" {
        // ...
    }
}"#,
        good_example: r#"struct OrderId(String);
struct CustomerId(String);

enum OrderStatus {
    Pending,
    Paid,
    Shipped,
}

fn ship(order: OrderId, customer: CustomerId, status: OrderStatus) {
    if let OrderStatus::Paid = status {
        // ...
    }
}"#,
    },
    Rule {
        id: "comments",
        title: "Comments that explain intent",
        description: "\
Code shows what happens; comments should say what the code cannot: intent, constraints and \
surprising consequences. A comment that restates the code adds noise and drifts out of date. \
Before writing one, try to make the code say it with a better name or a smaller function.",
        guidance: &[
            "Explain why, not what.",
            "Delete commented-out code; version control remembers it.",
            "Document public items with doc comments that describe the contract.",
            "Keep comments next to the code they describe and update them together.",
        ],
        bad_example: r#"// increment i
i += 1;

// fn old_checkout(cart: &Cart) {
//     ...
// }

// get the user
let u = repo.get(id);"#,
        good_example: r#"/// Returns the user, or `None` if the account was deleted.
fn find_user(repo: &Repo, id: UserId) -> Option<User> {
    // Deleted accounts are soft-deleted and must stay invisible to callers.
    repo.get(id).filter(|user| !user.deleted)
}"#,
    },
    Rule {
        id: "formatting",
        title: "Consistent formatting",
        description: "\
Formatting is communication. Consistent indentation, line length and ordering let readers focus \
on meaning instead of layout. Automate it with the language formatter so that reviews never \
discuss whitespace.",
        guidance: &[
            "Run the standard formatter (`cargo fmt`) and enforce it in CI.",
            "Keep lines within a fixed width.",
            "Separate logical blocks with a single blank line.",
            "Keep related code vertically close.",
        ],
        bad_example: r#"fn area(w:f64,h:f64)->f64{ let a=w*h;
        return a ;}"#,
        good_example: r#"fn area(width: f64, height: f64) -> f64 {
    width * height
}"#,
    },
];
