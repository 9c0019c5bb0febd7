use std::sync::LazyLock;

use regex::Regex;

use super::{PathRecord, SkipReason, SkippedBlock, UNKNOWN_PATH_GROUP};

static STARTPOINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*Startpoint:\s*(\S+)(.*)$").expect("valid regex"));
static ENDPOINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*Endpoint:\s*(\S+)(.*)$").expect("valid regex"));
static CLOCKED_BY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"clocked by\s+([^\s)]+)").expect("valid regex"));
static PATH_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*Path Group:\s*(\S+)").expect("valid regex"));
static PATH_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*Path Type:\s*(\S+)").expect("valid regex"));
static POINT_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*Point\b").expect("valid regex"));
static DATA_ARRIVAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*data arrival time\b").expect("valid regex"));
static CLOCK_NETWORK_DELAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*clock network delay \(propagated\)").expect("valid regex")
});
static SLACK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*slack\b").expect("valid regex"));
// Point-table row naming a pin followed by its cell type in parentheses.
static POINT_PIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\S+?/\S+)\s*\(").expect("valid regex"));
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?\d+(?:\.\d+)?").expect("valid regex"));
// Stdcell output pins that mark one logic stage.
static OUTPUT_PIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(?:Z|ZN|Y|Q\d*|QB\d*|QN|CO|COUT|S|SO|SUM)$").expect("valid regex")
});
static DATA_PIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(?:D\d*|DIN\d*|DATA\d*)$").expect("valid regex"));

fn first_number(line: &str) -> Option<f64> {
    NUMBER.find(line).and_then(|m| m.as_str().parse().ok())
}

fn last_number(line: &str) -> Option<f64> {
    NUMBER.find_iter(line).last().and_then(|m| m.as_str().parse().ok())
}

fn clock_of(rest: &str) -> Option<String> {
    CLOCKED_BY.captures(rest).map(|c| c[1].to_string())
}

/// Fields collected for the block currently being read.
#[derive(Debug)]
struct OpenBlock {
    start_line: usize,
    startpoint: String,
    start_clock: Option<String>,
    endpoint: Option<String>,
    end_clock: Option<String>,
    path_group: Option<String>,
    path_type: Option<String>,
    data_arrival: Option<f64>,
    launch_clock_delay: Option<f64>,
    capture_clock_delay: Option<f64>,
    in_point_table: bool,
    seen_data_arrival: bool,
    stage_count: u32,
    last_data_pin: Option<String>,
}

impl OpenBlock {
    fn new(start_line: usize, startpoint: String, start_clock: Option<String>) -> Self {
        Self {
            start_line,
            startpoint,
            start_clock,
            endpoint: None,
            end_clock: None,
            path_group: None,
            path_type: None,
            data_arrival: None,
            launch_clock_delay: None,
            capture_clock_delay: None,
            in_point_table: false,
            seen_data_arrival: false,
            stage_count: 0,
            last_data_pin: None,
        }
    }

    fn skip(self, reason: SkipReason) -> SkippedBlock {
        SkippedBlock { line: self.start_line, startpoint: self.startpoint, reason }
    }

    fn finish(self, slack: Option<f64>) -> Result<PathRecord, SkippedBlock> {
        let Some(slack) = slack else {
            return Err(self.skip(SkipReason::UnparsableSlack));
        };
        let Some(endpoint) = self.endpoint.clone() else {
            return Err(self.skip(SkipReason::MissingEndpoint));
        };
        let end_pin = self.last_data_pin.unwrap_or_else(|| format!("{endpoint}/D"));
        Ok(PathRecord {
            start_pin: format!("{}/CP", self.startpoint),
            startpoint: self.startpoint,
            endpoint,
            path_group: self.path_group.unwrap_or_else(|| UNKNOWN_PATH_GROUP.to_string()),
            path_type: self.path_type,
            slack,
            data_arrival: self.data_arrival,
            start_clock: self.start_clock,
            end_clock: self.end_clock,
            launch_clock_delay: self.launch_clock_delay,
            capture_clock_delay: self.capture_clock_delay,
            stage_count: (self.stage_count > 0).then_some(self.stage_count),
            end_pin,
        })
    }

    /// Feed one line inside the block. Returns `Some(slack)` when the line
    /// closes the block.
    fn absorb(&mut self, line: &str) -> Option<Option<f64>> {
        if let Some(c) = ENDPOINT.captures(line) {
            self.endpoint = Some(c[1].to_string());
            self.end_clock = clock_of(&c[2]);
            return None;
        }
        if let Some(c) = PATH_GROUP.captures(line) {
            self.path_group = Some(c[1].to_string());
            return None;
        }
        if let Some(c) = PATH_TYPE.captures(line) {
            self.path_type = Some(c[1].to_string());
            return None;
        }
        if SLACK.is_match(line) {
            return Some(last_number(line));
        }
        if POINT_HEADER.is_match(line) {
            self.in_point_table = true;
            return None;
        }

        if self.in_point_table {
            self.absorb_point_row(line);
        } else if self.seen_data_arrival
            && self.capture_clock_delay.is_none()
            && CLOCK_NETWORK_DELAY.is_match(line)
        {
            self.capture_clock_delay = first_number(line);
        }
        None
    }

    fn absorb_point_row(&mut self, line: &str) {
        if DATA_ARRIVAL.is_match(line) {
            self.in_point_table = false;
            self.seen_data_arrival = true;
            if self.data_arrival.is_none() {
                self.data_arrival = first_number(line);
            }
            return;
        }
        if CLOCK_NETWORK_DELAY.is_match(line) {
            if self.launch_clock_delay.is_none() {
                self.launch_clock_delay = first_number(line);
            }
            return;
        }
        let Some(c) = POINT_PIN.captures(line) else {
            return;
        };
        if line.contains("(net)") {
            return;
        }
        let pin = &c[1];
        if OUTPUT_PIN.is_match(pin) && line.contains('&') {
            self.stage_count += 1;
        }
        if DATA_PIN.is_match(pin) {
            self.last_data_pin = Some(pin.to_string());
        }
    }
}

#[derive(Debug)]
enum State {
    Outside,
    InBlock(Box<OpenBlock>),
}

/// Single forward pass over report lines, yielding one item per path block.
///
/// Well-formed blocks come out as `Ok(PathRecord)`; malformed ones as
/// `Err(SkippedBlock)` so the caller can warn and carry on.
pub struct PathParser<I> {
    lines: I,
    line_no: usize,
    state: State,
}

impl<I, S> PathParser<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    pub fn new(lines: I) -> Self {
        Self { lines, line_no: 0, state: State::Outside }
    }

    fn open(&mut self, startpoint: String, rest: &str) {
        let block = OpenBlock::new(self.line_no, startpoint, clock_of(rest));
        self.state = State::InBlock(Box::new(block));
    }
}

impl<I, S> Iterator for PathParser<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<PathRecord, SkippedBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(raw) = self.lines.next() {
            self.line_no += 1;
            let line = raw.as_ref();

            if let Some(c) = STARTPOINT.captures(line) {
                let previous = std::mem::replace(&mut self.state, State::Outside);
                self.open(c[1].to_string(), &c[2]);
                if let State::InBlock(unfinished) = previous {
                    return Some(Err(unfinished.skip(SkipReason::MissingSlack)));
                }
                continue;
            }

            let closing = match &mut self.state {
                State::InBlock(block) => block.absorb(line),
                State::Outside => continue,
            };
            if let Some(slack) = closing {
                if let State::InBlock(block) = std::mem::replace(&mut self.state, State::Outside) {
                    return Some(block.finish(slack));
                }
            }
        }

        match std::mem::replace(&mut self.state, State::Outside) {
            State::InBlock(unfinished) => Some(Err(unfinished.skip(SkipReason::MissingSlack))),
            State::Outside => None,
        }
    }
}

/// Parse report lines into a lazy sequence of path records.
pub fn parse_report<L>(lines: L) -> PathParser<L::IntoIter>
where
    L: IntoIterator,
    L::Item: AsRef<str>,
{
    PathParser::new(lines.into_iter())
}
