//! Dashboard HTML template
//!
//! Primary view: user id field + load button, then exactly one of the
//! loading / signal / error panels.  Secondary view: subscribe form.

pub const TEMPLATE: &str = r#"
    <main>
        <section id="loader">
            <input id="userId" type="text" placeholder="User ID (optional)">
            <button id="loadSignalBtn">Load Signal</button>
        </section>

        <div id="loading" class="hidden">Loading signal...</div>

        <section id="signalContainer" class="hidden">
            <div id="timestamp"></div>
            <div>Price: <span id="price">--</span></div>
            <div id="signalBadge" class="signal-badge"><span class="signal-text">--</span></div>
            <div>Position: <span id="position"></span></div>
            <div>Reason: <span id="reason"></span></div>
            <div>Distance from MA: <span id="distance"></span></div>
            <div id="maGrid"></div>
            <div id="strategyInfo" class="hidden">
                <div id="strategyName"></div>
                <div>MA Period: <span id="maPeriod"></span></div>
                <div>Sell Threshold: <span id="sellThreshold"></span></div>
                <div>Buy Threshold: <span id="buyThreshold"></span></div>
            </div>
        </section>

        <section id="errorContainer" class="hidden">
            <p id="errorText"></p>
            <button id="retryBtn">Retry</button>
        </section>

        <section id="subscribe">
            <input id="email" type="email" placeholder="you@example.com">
            <select id="strategy">
                <option value="default">Default (MA200 ±5%)</option>
                <option value="custom">Custom</option>
            </select>
            <div id="customParams" class="hidden">
                <input id="customMaPeriod" type="number" min="1" value="200">
                <input id="customSellPercent" type="number" step="0.1" value="5.0">
                <input id="customBuyPercent" type="number" step="0.1" value="5.0">
            </div>
            <button id="subscribeBtn">Subscribe</button>
            <div id="subscribeStatus" class="hidden"></div>
        </section>
    </main>
"#;
