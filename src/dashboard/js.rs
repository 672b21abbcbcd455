//! Dashboard JavaScript
//!
//! - `applyView(view)`: writes a `ViewModel` into the DOM; the custom-strategy
//!   inputs only when their server-side values change
//! - `post(path, body)`: forwards a command; errors are already in the view
//! - WebSocket reconnects every 2 seconds after a drop

pub const SCRIPT: &str = r#"
const $ = (id) => document.getElementById(id);
const show = (el, visible) => el.classList.toggle('hidden', !visible);
let appliedCustom = null;

function applyView(view) {
    const panel = view.panel.state;
    show($('loading'), panel === 'loading');
    show($('signalContainer'), panel === 'content' && !!view.signal);
    show($('errorContainer'), panel === 'error');
    if (panel === 'error') $('errorText').textContent = view.panel.message;

    if (document.activeElement !== $('userId')) $('userId').value = view.user_id_input;
    if (view.signal) applySignal(view.signal);

    const sub = view.subscribe;
    if ($('strategy').value !== sub.strategy) $('strategy').value = sub.strategy;
    show($('customParams'), !!sub.custom);
    // rewrite inputs only when the fields themselves changed
    const custom = sub.custom ? JSON.stringify(sub.custom) : null;
    if (custom !== appliedCustom) {
        appliedCustom = custom;
        if (sub.custom) {
            $('customMaPeriod').value = sub.custom.ma_period;
            $('customSellPercent').value = sub.custom.sell_percent;
            $('customBuyPercent').value = sub.custom.buy_percent;
        }
    }
    const status = $('subscribeStatus');
    show(status, !!sub.status);
    status.textContent = sub.status ? sub.status.text : '';
    status.className = sub.status ? 'status ' + sub.status.kind : 'hidden';
}

function applySignal(s) {
    $('timestamp').textContent = s.timestamp;
    $('price').textContent = s.price;
    document.querySelector('.signal-text').textContent = s.action;
    const badge = $('signalBadge');
    badge.classList.remove('buy', 'sell', 'hold');
    if (s.badge) badge.classList.add(s.badge);
    $('position').textContent = s.position;
    $('reason').textContent = s.reason;
    $('distance').textContent = s.distance;

    const grid = $('maGrid');
    grid.replaceChildren(...s.moving_averages.map((ma) => {
        const item = document.createElement('div');
        item.className = 'ma-item';
        const period = document.createElement('div');
        period.className = 'period';
        period.textContent = ma.label;
        const value = document.createElement('div');
        value.className = 'value';
        value.textContent = ma.value;
        item.append(period, value);
        return item;
    }));

    show($('strategyInfo'), !!s.strategy);
    if (s.strategy) {
        $('strategyName').textContent = s.strategy.name;
        $('maPeriod').textContent = s.strategy.ma_period;
        $('sellThreshold').textContent = s.strategy.sell_threshold;
        $('buyThreshold').textContent = s.strategy.buy_threshold;
    }
}

async function post(path, body) {
    try {
        await fetch(path, {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify(body || {}),
        });
    } catch (e) {
        console.error(`POST ${path} failed:`, e);
    }
}

const loadSignal = () => post('/api/signal/load', { user_id: $('userId').value });

function subscribe() {
    const strategy = $('strategy').value;
    const body = { email: $('email').value, strategy };
    if (strategy === 'custom') {
        body.custom = {
            ma_period: parseInt($('customMaPeriod').value, 10) || 0,
            sell_percent: parseFloat($('customSellPercent').value) || 0,
            buy_percent: parseFloat($('customBuyPercent').value) || 0,
        };
    }
    post('/api/subscribe', body);
}

function connect() {
    const proto = location.protocol === 'https:' ? 'wss' : 'ws';
    const ws = new WebSocket(`${proto}://${location.host}/ws/view`);
    ws.onmessage = (msg) => {
        const event = JSON.parse(msg.data);
        if (event.event === 'VIEW_UPDATED') applyView(event.view);
    };
    ws.onclose = () => setTimeout(connect, 2000);
}

document.addEventListener('DOMContentLoaded', () => {
    connect();
    $('loadSignalBtn').addEventListener('click', loadSignal);
    $('retryBtn').addEventListener('click', loadSignal);
    $('subscribeBtn').addEventListener('click', subscribe);
    $('userId').addEventListener('keypress', (e) => { if (e.key === 'Enter') loadSignal(); });
    $('email').addEventListener('keypress', (e) => { if (e.key === 'Enter') subscribe(); });
    $('strategy').addEventListener('change', (e) => post('/api/strategy/select', { strategy: e.target.value }));
});

window.addEventListener('online', () => post('/api/connectivity', { online: true }));
window.addEventListener('offline', () => {
    show($('loading'), false);
    show($('signalContainer'), false);
    $('errorText').textContent = 'You appear to be offline. Please check your internet connection.';
    show($('errorContainer'), true);
    post('/api/connectivity', { online: false });
});
"#;
