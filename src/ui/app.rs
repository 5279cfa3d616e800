use super::input::TextInput;
use crate::analytics::{self, CategorySpend, Timeframe};
use crate::auth::{Authenticator, DemoAuthenticator};
use crate::catalog::{self, CategoryFilter};
use crate::config::Settings;
use crate::entities::{CardRegistry, Category, Identity, Transaction};
use crate::export::export_to_path;
use crate::flow::{PaymentFlow, PaymentInput, PaymentMethod, PaymentStep, TransferFlow, TransferInput, TransferStep};
use crate::router::{Router, ViewId};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::{ListState, TableState};
use std::time::Instant;

// ============================================================================
// SCREEN STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug, Clone)]
pub struct LoginState {
    pub email: TextInput,
    pub password: TextInput,
    pub focus: LoginField,
    pub error: Option<String>,
}

impl Default for LoginState {
    fn default() -> Self {
        LoginState {
            email: TextInput::new(),
            password: TextInput::masked(),
            focus: LoginField::Email,
            error: None,
        }
    }
}

impl LoginState {
    fn focused(&mut self) -> &mut TextInput {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    fn switch_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub show_balance: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        DashboardState { show_balance: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountField {
    Amount,
    Note,
}

#[derive(Debug)]
pub struct SendState {
    pub flow: TransferFlow,
    pub contacts: Vec<Identity>,
    pub list: ListState,
    pub amount: TextInput,
    pub note: TextInput,
    pub focus: AmountField,
    pub error: Option<String>,
}

impl SendState {
    pub fn new() -> Self {
        let contacts = catalog::list_contacts();
        SendState {
            flow: TransferFlow::new(),
            list: first_selected(contacts.len()),
            contacts,
            amount: TextInput::new(),
            note: TextInput::new(),
            focus: AmountField::Amount,
            error: None,
        }
    }

    fn selected_contact(&self) -> Option<Identity> {
        self.list.selected().and_then(|i| self.contacts.get(i)).cloned()
    }

    fn focused(&mut self) -> &mut TextInput {
        match self.focus {
            AmountField::Amount => &mut self.amount,
            AmountField::Note => &mut self.note,
        }
    }
}

impl Default for SendState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct PayState {
    pub flow: PaymentFlow,
    pub merchants: Vec<Identity>,
    pub method_list: ListState,
    pub merchant_list: ListState,
    pub custom_merchant: TextInput,
    pub amount: TextInput,
    pub error: Option<String>,
}

impl PayState {
    pub fn new() -> Self {
        let merchants = catalog::list_merchants();
        PayState {
            flow: PaymentFlow::new(),
            method_list: first_selected(PaymentMethod::ALL.len()),
            merchant_list: first_selected(merchants.len()),
            merchants,
            custom_merchant: TextInput::new(),
            amount: TextInput::new(),
            error: None,
        }
    }

    fn selected_method(&self) -> Option<PaymentMethod> {
        self.method_list.selected().and_then(|i| PaymentMethod::ALL.get(i)).copied()
    }

    /// Typed name wins over the highlighted catalog entry
    fn chosen_merchant(&self) -> Result<Identity, crate::validation::ValidationError> {
        if !self.custom_merchant.is_blank() {
            return Identity::custom_merchant(self.custom_merchant.value());
        }
        self.merchant_list
            .selected()
            .and_then(|i| self.merchants.get(i))
            .cloned()
            .ok_or(crate::validation::ValidationError::MissingMerchantName)
    }
}

impl Default for PayState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    Name,
    Limit,
}

#[derive(Debug, Clone)]
pub struct CardForm {
    pub name: TextInput,
    pub limit: TextInput,
    pub focus: CardField,
    pub error: Option<String>,
}

impl CardForm {
    fn new() -> Self {
        CardForm {
            name: TextInput::new(),
            limit: TextInput::new(),
            focus: CardField::Name,
            error: None,
        }
    }

    fn focused(&mut self) -> &mut TextInput {
        match self.focus {
            CardField::Name => &mut self.name,
            CardField::Limit => &mut self.limit,
        }
    }

    fn switch_focus(&mut self) {
        self.focus = match self.focus {
            CardField::Name => CardField::Limit,
            CardField::Limit => CardField::Name,
        };
    }
}

#[derive(Debug)]
pub struct CardsState {
    pub registry: CardRegistry,
    pub list: ListState,
    pub form: Option<CardForm>,
}

impl Default for CardsState {
    fn default() -> Self {
        let registry = CardRegistry::with_defaults();
        CardsState {
            list: first_selected(registry.len()),
            registry,
            form: None,
        }
    }
}

#[derive(Debug)]
pub struct AnalyticsState {
    pub timeframe: Timeframe,
    pub breakdown: Vec<CategorySpend>,
    pub list: ListState,
    pub highlighted: Option<Category>,
}

impl Default for AnalyticsState {
    fn default() -> Self {
        let breakdown = analytics::spending_breakdown();
        AnalyticsState {
            timeframe: Timeframe::default(),
            list: first_selected(breakdown.len()),
            breakdown,
            highlighted: None,
        }
    }
}

#[derive(Debug)]
pub struct AccountState {
    pub transactions: Vec<Transaction>,
    pub filter: CategoryFilter,
    /// Chip under the cursor in the filter bar
    pub cursor: usize,
    pub table: TableState,
}

impl Default for AccountState {
    fn default() -> Self {
        let transactions = catalog::list_transactions();
        let mut table = TableState::default();
        if !transactions.is_empty() {
            table.select(Some(0));
        }
        AccountState {
            transactions,
            filter: CategoryFilter::All,
            cursor: 0,
            table,
        }
    }
}

impl AccountState {
    pub fn visible(&self) -> Vec<Transaction> {
        catalog::filter_by_category(&self.transactions, self.filter)
    }

    fn apply_cursor(&mut self) {
        let bar = CategoryFilter::bar();
        if let Some(clicked) = bar.get(self.cursor) {
            self.filter = self.filter.toggle(*clicked);
        }
        let visible = self.visible().len();
        self.table.select(if visible == 0 { None } else { Some(0) });
    }
}

// ============================================================================
// APP
// ============================================================================

pub struct App {
    pub router: Router,
    pub settings: Settings,
    authenticator: Box<dyn Authenticator>,
    pub login: LoginState,
    pub dashboard: DashboardState,
    pub send: Option<SendState>,
    pub pay: Option<PayState>,
    pub cards: CardsState,
    pub analytics: AnalyticsState,
    pub account: AccountState,
    /// One-line feedback shown in the status bar
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let authenticator = Box::new(DemoAuthenticator::new(settings.min_password_len));
        Self::with_authenticator(settings, authenticator)
    }

    pub fn with_authenticator(settings: Settings, authenticator: Box<dyn Authenticator>) -> Self {
        App {
            router: Router::new(),
            settings,
            authenticator,
            login: LoginState::default(),
            dashboard: DashboardState::default(),
            send: None,
            pay: None,
            cards: CardsState::default(),
            analytics: AnalyticsState::default(),
            account: AccountState::default(),
            status: None,
            should_quit: false,
        }
    }

    pub fn mounted(&self) -> ViewId {
        self.router.mounted()
    }

    /// Switch top-level screen. Leaving a wizard throws its draft away.
    pub fn navigate(&mut self, view: ViewId) {
        self.abandon_flows();

        match view {
            ViewId::Send => self.send = Some(SendState::new()),
            ViewId::Pay => self.pay = Some(PayState::new()),
            _ => {}
        }

        self.status = None;
        self.router.navigate(view);
    }

    fn abandon_flows(&mut self) {
        if let Some(mut send) = self.send.take() {
            send.flow.reset();
        }
        if let Some(mut pay) = self.pay.take() {
            pay.flow.reset();
        }
    }

    pub fn logout(&mut self) {
        self.abandon_flows();
        self.login = LoginState::default();
        self.dashboard = DashboardState::default();
        self.status = None;
        self.router.logout();
    }

    /// Fire pending completion timers; a finished wizard returns to the dashboard
    pub fn on_tick(&mut self, now: Instant) {
        let send_done = self.send.as_mut().map_or(false, |s| s.flow.poll_completion(now));
        let pay_done = self.pay.as_mut().map_or(false, |p| p.flow.poll_completion(now));

        if send_done || pay_done {
            self.navigate(ViewId::Dashboard);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.router.mounted() {
            ViewId::Login => self.on_login_key(key),
            ViewId::Dashboard => self.on_dashboard_key(key),
            ViewId::Send => self.on_send_key(key),
            ViewId::Pay => self.on_pay_key(key),
            ViewId::Cards => self.on_cards_key(key),
            ViewId::Analytics => self.on_analytics_key(key),
            ViewId::Account => self.on_account_key(key),
        }
    }

    // ------------------------------------------------------------------------
    // Login
    // ------------------------------------------------------------------------

    fn on_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => self.login.switch_focus(),
            KeyCode::F(2) => self.login.password.toggle_mask(),
            KeyCode::Backspace => self.login.focused().pop(),
            KeyCode::Enter => self.submit_login(),
            _ => {
                if let Some(c) = typed_char(&key) {
                    self.login.focused().push(c);
                }
            }
        }
    }

    fn submit_login(&mut self) {
        let result = self.router.try_login(
            self.authenticator.as_ref(),
            self.login.email.value(),
            self.login.password.value(),
        );

        match result {
            Ok(()) => {
                self.login.password.clear();
                self.login.error = None;
                self.navigate(ViewId::Dashboard);
            }
            Err(err) => self.login.error = Some(err.to_string()),
        }
    }

    // ------------------------------------------------------------------------
    // Dashboard
    // ------------------------------------------------------------------------

    fn on_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('1') => self.navigate(ViewId::Send),
            KeyCode::Char('2') => self.navigate(ViewId::Pay),
            KeyCode::Char('3') => self.navigate(ViewId::Cards),
            KeyCode::Char('4') => self.navigate(ViewId::Analytics),
            KeyCode::Char('a') => self.navigate(ViewId::Account),
            KeyCode::Char('b') => self.dashboard.show_balance = !self.dashboard.show_balance,
            KeyCode::Char('l') => self.logout(),
            _ => {}
        }
    }

    // ------------------------------------------------------------------------
    // Send money
    // ------------------------------------------------------------------------

    fn on_send_key(&mut self, key: KeyEvent) {
        let delay = self.settings.completion_delay();
        let Some(send) = self.send.as_mut() else {
            self.navigate(ViewId::Dashboard);
            return;
        };

        let mut leave = false;

        match send.flow.current_step() {
            TransferStep::Select => match key.code {
                KeyCode::Up => step_list(&mut send.list, send.contacts.len(), false),
                KeyCode::Down => step_list(&mut send.list, send.contacts.len(), true),
                KeyCode::Enter => {
                    if let Some(contact) = send.selected_contact() {
                        send.error = send.flow.advance(TransferInput::Recipient(contact)).err().map(|e| e.to_string());
                    }
                }
                KeyCode::Esc => leave = true,
                _ => {}
            },
            TransferStep::Amount => match key.code {
                KeyCode::Esc => {
                    send.error = None;
                    let _ = send.flow.retreat();
                }
                KeyCode::Tab | KeyCode::BackTab => {
                    send.focus = match send.focus {
                        AmountField::Amount => AmountField::Note,
                        AmountField::Note => AmountField::Amount,
                    };
                }
                KeyCode::Enter => {
                    let input = TransferInput::Amount {
                        amount: send.amount.value().to_string(),
                        note: send.note.value().to_string(),
                    };
                    send.error = send.flow.advance(input).err().map(|e| e.to_string());
                }
                KeyCode::Backspace => send.focused().pop(),
                _ => {
                    if let Some(c) = typed_char(&key) {
                        send.focused().push(c);
                    }
                }
            },
            TransferStep::Confirm => match key.code {
                KeyCode::Enter => {
                    send.error = send.flow.complete(Instant::now(), delay).err().map(|e| e.to_string());
                }
                KeyCode::Esc | KeyCode::Backspace => {
                    let _ = send.flow.retreat();
                }
                _ => {}
            },
            TransferStep::Success => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    leave = true;
                }
            }
        }

        if leave {
            self.navigate(ViewId::Dashboard);
        }
    }

    // ------------------------------------------------------------------------
    // Pay
    // ------------------------------------------------------------------------

    fn on_pay_key(&mut self, key: KeyEvent) {
        let delay = self.settings.completion_delay();
        let Some(pay) = self.pay.as_mut() else {
            self.navigate(ViewId::Dashboard);
            return;
        };

        let mut leave = false;

        match pay.flow.current_step() {
            PaymentStep::Method => match key.code {
                KeyCode::Up => step_list(&mut pay.method_list, PaymentMethod::ALL.len(), false),
                KeyCode::Down => step_list(&mut pay.method_list, PaymentMethod::ALL.len(), true),
                KeyCode::Enter => {
                    if let Some(method) = pay.selected_method() {
                        pay.error = pay.flow.advance(PaymentInput::Method(method)).err().map(|e| e.to_string());
                    }
                }
                KeyCode::Esc => leave = true,
                _ => {}
            },
            PaymentStep::Merchant => match key.code {
                KeyCode::Up => step_list(&mut pay.merchant_list, pay.merchants.len(), false),
                KeyCode::Down => step_list(&mut pay.merchant_list, pay.merchants.len(), true),
                KeyCode::Enter => {
                    pay.error = match pay.chosen_merchant() {
                        Ok(merchant) => pay.flow.advance(PaymentInput::Merchant(merchant)).err().map(|e| e.to_string()),
                        Err(err) => Some(err.to_string()),
                    };
                }
                KeyCode::Esc => {
                    pay.error = None;
                    let _ = pay.flow.retreat();
                }
                KeyCode::Backspace => pay.custom_merchant.pop(),
                _ => {
                    if let Some(c) = typed_char(&key) {
                        pay.custom_merchant.push(c);
                    }
                }
            },
            PaymentStep::Amount => match key.code {
                KeyCode::Enter => {
                    let input = PaymentInput::Amount(pay.amount.value().to_string());
                    pay.error = pay.flow.advance(input).err().map(|e| e.to_string());
                }
                KeyCode::Esc => {
                    pay.error = None;
                    let _ = pay.flow.retreat();
                }
                KeyCode::Backspace => pay.amount.pop(),
                _ => {
                    if let Some(c) = typed_char(&key) {
                        pay.amount.push(c);
                    }
                }
            },
            PaymentStep::Confirm => match key.code {
                KeyCode::Enter => {
                    pay.error = pay.flow.complete(Instant::now(), delay).err().map(|e| e.to_string());
                }
                KeyCode::Esc | KeyCode::Backspace => {
                    let _ = pay.flow.retreat();
                }
                _ => {}
            },
            PaymentStep::Success => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    leave = true;
                }
            }
        }

        if leave {
            self.navigate(ViewId::Dashboard);
        }
    }

    // ------------------------------------------------------------------------
    // Cards
    // ------------------------------------------------------------------------

    fn on_cards_key(&mut self, key: KeyEvent) {
        let cards = &mut self.cards;

        if let Some(form) = cards.form.as_mut() {
            match key.code {
                KeyCode::Esc => cards.form = None,
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.switch_focus(),
                KeyCode::Backspace => form.focused().pop(),
                KeyCode::Enter => {
                    let created = cards
                        .registry
                        .create(form.name.value(), form.limit.value(), &mut rand::thread_rng())
                        .map(|card| card.name.clone());

                    match created {
                        Ok(name) => {
                            cards.form = None;
                            cards.list.select(Some(cards.registry.len() - 1));
                            self.status = Some(format!("Carte « {} » créée", name));
                        }
                        Err(err) => form.error = Some(err.to_string()),
                    }
                }
                _ => {
                    if let Some(c) = typed_char(&key) {
                        form.focused().push(c);
                    }
                }
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.navigate(ViewId::Dashboard),
            KeyCode::Up => step_list(&mut cards.list, cards.registry.len(), false),
            KeyCode::Down => step_list(&mut cards.list, cards.registry.len(), true),
            KeyCode::Char('n') => cards.form = Some(CardForm::new()),
            KeyCode::Char('d') | KeyCode::Delete => {
                let selected = cards
                    .list
                    .selected()
                    .and_then(|i| cards.registry.cards().get(i))
                    .map(|card| card.id.clone());

                if let Some(id) = selected {
                    if let Some(removed) = cards.registry.delete(&id) {
                        self.status = Some(format!("Carte « {} » supprimée", removed.name));
                    }
                    let len = cards.registry.len();
                    cards.list.select(match cards.list.selected() {
                        _ if len == 0 => None,
                        Some(i) if i >= len => Some(len - 1),
                        other => other,
                    });
                }
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------------
    // Analytics
    // ------------------------------------------------------------------------

    fn on_analytics_key(&mut self, key: KeyEvent) {
        let analytics = &mut self.analytics;
        match key.code {
            KeyCode::Esc => self.navigate(ViewId::Dashboard),
            KeyCode::Left => analytics.timeframe = analytics.timeframe.previous(),
            KeyCode::Right => analytics.timeframe = analytics.timeframe.next(),
            KeyCode::Up => step_list(&mut analytics.list, analytics.breakdown.len(), false),
            KeyCode::Down => step_list(&mut analytics.list, analytics.breakdown.len(), true),
            KeyCode::Enter => {
                if let Some(spend) = analytics.list.selected().and_then(|i| analytics.breakdown.get(i)) {
                    analytics.highlighted = if analytics.highlighted == Some(spend.category) {
                        None
                    } else {
                        Some(spend.category)
                    };
                }
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------------
    // Account
    // ------------------------------------------------------------------------

    fn on_account_key(&mut self, key: KeyEvent) {
        let bar_len = CategoryFilter::bar().len();
        match key.code {
            KeyCode::Esc => self.navigate(ViewId::Dashboard),
            KeyCode::Left => self.account.cursor = (self.account.cursor + bar_len - 1) % bar_len,
            KeyCode::Right => self.account.cursor = (self.account.cursor + 1) % bar_len,
            KeyCode::Enter => self.account.apply_cursor(),
            KeyCode::Up => {
                let len = self.account.visible().len();
                step_table(&mut self.account.table, len, false);
            }
            KeyCode::Down => {
                let len = self.account.visible().len();
                step_table(&mut self.account.table, len, true);
            }
            KeyCode::Char('e') => self.export_history(),
            _ => {}
        }
    }

    fn export_history(&mut self) {
        let rows = self.account.visible();
        let path = self.settings.export_path.clone();

        self.status = Some(match export_to_path(&path, &rows) {
            Ok(count) => format!("{} transactions exportées vers {}", count, path.display()),
            Err(err) => {
                tracing::error!(error = %err, "export failed");
                format!("Échec de l'export: {}", err)
            }
        });
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Printable character typed without Ctrl/Alt
fn typed_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => Some(c),
        _ => None,
    }
}

fn first_selected(len: usize) -> ListState {
    let mut state = ListState::default();
    if len > 0 {
        state.select(Some(0));
    }
    state
}

fn next_index(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(i) if forward => {
            if i >= len - 1 {
                0
            } else {
                i + 1
            }
        }
        Some(i) => {
            if i == 0 {
                len - 1
            } else {
                i - 1
            }
        }
        None => 0,
    })
}

fn step_list(state: &mut ListState, len: usize, forward: bool) {
    state.select(next_index(state.selected(), len, forward));
}

fn step_table(state: &mut TableState, len: usize, forward: bool) {
    state.select(next_index(state.selected(), len, forward));
}
